/// Compute an histogram with a very basic method.
pub fn simple_count_u8(src: &[u8], ret: &mut [usize; 256]) {
    src.iter().for_each(|&c| ret[c as usize] += 1)
}
