pub mod json;
pub mod text;

use crate::config::Config;
use crate::digest::Digest;

pub fn print(digest: &Digest, config: &Config) {
    if config.json_output {
        println!("{}", json::render(digest));
    } else {
        print!("{}", text::render(digest));
    }
}
