//! Basic usage example for ATEM command packets.

use atem_command::{
    CommandLayout, FieldKind, FieldValue, Fields, Packet, PacketBuffer, ProgramInput,
    ProtocolConfig, TransitionPosition,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== ATEM Command Packet Example ===\n");

    // 1. Raw buffer access
    println!("1. Writing scalars into a raw buffer...");
    let mut buf = PacketBuffer::new(8);
    buf.write_int(0, 0, 8, false)?;
    buf.write_int(1, 127, 8, false)?;
    buf.write_int(3, -2, 8, true)?;
    buf.write_flag(4, 16, 9, true)?;
    println!("   Bytes: {:02X?}", buf.as_bytes());

    // 2. Typed command
    println!("\n2. Encoding a typed PrgI command...");
    let program = ProgramInput {
        mix_effect: 0,
        source: 1000,
    };
    let raw = program.to_bytes()?;
    println!("   Encoded {}: {:02X?}", ProgramInput::NAME, &raw[..]);
    println!("   Decoded: {:?}", ProgramInput::from_bytes(&raw)?);

    // 3. Layout-driven decode of a typed encode
    println!("\n3. Decoding TrPs through a declarative layout...");
    let layout = CommandLayout::new("TrPs", 8)
        .with_field("in_transition", 1, FieldKind::Flag { bits: 8, bit: 0 })
        .with_field(
            "position",
            4,
            FieldKind::Float {
                bits: 16,
                factor: 4,
                signed: false,
            },
        );
    layout.validate()?;

    let transition = TransitionPosition {
        mix_effect: 0,
        in_transition: true,
        frames_remaining: 10,
        position: 0.375,
    };
    for (name, value) in layout.decode(&transition.to_bytes()?)? {
        println!("   {} = {}", name, value);
    }

    // 4. Protocol definitions
    println!("\n4. Encoding from protocol definitions...");
    let config = ProtocolConfig::from_yaml_str(include_str!("../protocol/commands.yaml"))?;
    println!("   Loaded {} command layouts", config.commands.len());

    if let Some(amip) = config.command("AMIP") {
        let mut values = Fields::new();
        values.insert("source".to_string(), FieldValue::Int(1301));
        values.insert("volume".to_string(), FieldValue::Int(32768));
        values.insert("balance".to_string(), FieldValue::Float(-0.25));
        let raw = amip.encode(&values)?;
        println!("   Encoded AMIP: {:02X?}", &raw[..]);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
