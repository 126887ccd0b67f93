use hwreg::prelude::*;

register! {
    struct Overlap: u32 {
        size: field(7, 4),
        _: rsvdz_field(4, 0),
    }

    struct SameBit: u8 {
        enabled: bit(0),
        _: rsvdz_bit(0),
    }
}

fn main() {}
