use hwreg::BitRange;

const INVERTED: BitRange = BitRange::field::<u32>(3, 7);
const TOO_WIDE: BitRange = BitRange::bit::<u8>(8);
const OUTSIDE_PARENT: BitRange = BitRange::field::<u32>(7, 4).sub_field(4, 0);

fn main() {
    let _ = (INVERTED, TOO_WIDE, OUTSIDE_PARENT);
}
