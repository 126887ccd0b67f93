use hwreg::RegisterAddr;

struct NotARegister;

fn main() {
    let raw = RegisterAddr::<u32>::new(0x10);
    let plain = RegisterAddr::<NotARegister>::new(0x20);
    let _ = (raw, plain);
}
