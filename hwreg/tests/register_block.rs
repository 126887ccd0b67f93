use hwreg::prelude::*;

mod common;

use common::RecordingIo;

register! {
    pub struct Command: u32 {
        pub opcode: field(7, 0),
        pub start: bit(31) as bool,
        _: rsvdz_field(30, 24),
    }

    pub struct Status: u32 {
        pub busy: bit(0) as bool,
        pub error_code: field(15, 8),
    }

    pub struct Scratch: u16 {
        pub data: field(15, 0),
    }
}

register_block! {
    /// A command engine.
    pub struct Engine {
        pub command: Command @ 0x0,
        pub status: Status @ 0x4,
        pub scratch: [Scratch; 4, 0x2] @ 0x10,
    }
}

const ENGINE_0: Engine = Engine::new(0x1000);
const ENGINE_1: Engine = Engine::new(0x2000);

#[test]
fn devices_at_different_bases() {
    assert_eq!(ENGINE_0.command().addr(), 0x1000);
    assert_eq!(ENGINE_1.command().addr(), 0x2000);
    assert_eq!(ENGINE_1.status().addr(), 0x2004);
    assert_eq!(ENGINE_1.scratch(3).addr(), 0x2016);
    assert_eq!(ENGINE_1.scratch_3(), ENGINE_1.scratch(3));
}

#[test]
fn command_sequence() {
    let io = RecordingIo::new().with_value(0x1004, 0x0000_2a01);

    ENGINE_0
        .command()
        .from_value(0x7f00_0000)
        .with_opcode(0x42)
        .with_start(true)
        .write_to(&io);

    let status = ENGINE_0.status().read_from(&io);
    assert!(status.busy());
    assert_eq!(status.error_code(), 0x2a);

    for index in 0..4 {
        ENGINE_0
            .scratch(index)
            .from_value(0)
            .with_data(index as u16 * 0x1111)
            .write_to(&io);
    }

    assert_eq!(
        io.writes(),
        [
            (0x1000, 0x8000_0042),
            (0x1010, 0x0000),
            (0x1012, 0x1111),
            (0x1014, 0x2222),
            (0x1016, 0x3333),
        ],
    );
}

#[test]
#[should_panic(expected = "register array index out of bounds")]
fn scratch_index_out_of_bounds() {
    let _ = ENGINE_0.scratch(4);
}
