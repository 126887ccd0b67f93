use hwreg::{ReservedZeroMask, RegisterBase};

fn main() {
    let _ = RegisterBase::<u32>::new(ReservedZeroMask::new());
}
