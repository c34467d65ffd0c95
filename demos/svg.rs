use std::io::Read;

use linear_barcode::code128::Code128;

fn main() {
    let mut msg = Vec::new();
    if atty::isnt(atty::Stream::Stdin) {
        let mut stdin = std::io::stdin();
        stdin.read_to_end(&mut msg).unwrap();
    }
    let code = match Code128::encode(&msg) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    let height = 20;
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}"><path d=""#,
        code.len(),
        height,
    );
    for bar in code.bar_coordinates() {
        svg += &format!("M{} 0h{}v{}h-{}z", bar.x, bar.width, height, bar.width);
    }
    svg += r#""/></svg>"#;
    println!("{}", svg);
}
