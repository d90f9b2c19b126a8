use scpi_interpreter::interpret;

fn main() {
    println!("=== SCPI Interpreter Demo ===");

    let commands = [
        "*IDN?",
        "*RST",
        ":INPut:POSition:a0:ANGLe:IMMediate",
        ":INP:POS:a2:ANGL:LIM:HIGH",
        ":INIT:IMM",
        ":INP:POS:",
        ":IN:",
    ];

    for command in commands {
        let result = interpret(command.as_bytes());
        println!("\nInput: '{}'", command);
        println!(
            "Result: {:?} (code {}) event {:#06x} {}",
            result.kind(),
            result.code(),
            result.event_id(),
            result.event
        );
        println!("Reply: {}", result.reply);
    }
}
