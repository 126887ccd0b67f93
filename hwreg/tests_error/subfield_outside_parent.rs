use hwreg::prelude::*;

register! {
    struct Mode: u32 {
        mode: field(7, 4) {
            low: subfield(4, 0),
        },
    }

    struct Lock: u32 {
        mode: field(7, 4) {
            lock: subbit(4),
        },
    }
}

fn main() {}
