mod config;
mod core;
mod render;
mod types;
mod ui;
mod validate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    ui::run()
}
