use offset_heap::OffsetHeap;

fn main() {
    let values = (1..=10u32).rev().collect::<Vec<u32>>();

    for offset in 0..4 {
        let heap = OffsetHeap::from_slice_with_offset(&values, offset).unwrap();
        println!("{} {}", offset, heap);
    }
}
