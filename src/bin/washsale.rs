use std::io::Write;

fn main() {
    let code = washsale::cmd::command_main();
    if code != 0 {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        std::process::exit(code);
    }
}
