//! Sample entry point

/* Block comment
   spanning lines */
fn main() {
    // greet
    println!("Hello from sample project!");
}

fn helper() -> i32 {
    42
}
