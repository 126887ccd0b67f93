use hwreg::prelude::*;

register! {
    struct ValueField: u16 {
        too_wide: field(16, 8),
    }

    struct ReservedBit: u8 {
        _: rsvdz_bit(8),
    }

    struct TopBit: u32 {
        flag: bit(32),
    }
}

fn main() {}
