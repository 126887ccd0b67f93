use hwreg::prelude::*;

register! {
    struct Inverted: u32 {
        low_first: field(3, 7),
    }

    struct SingleBitField: u32 {
        same: field(5, 5),
    }
}

fn main() {}
