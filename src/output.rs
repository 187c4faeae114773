//! User-facing console printing. Status lines carry a colored severity
//! prefix when the stream is a TTY; primary output stays plain so it can be
//! scripted against.

use owo_colors::{AnsiColors, OwoColorize};

enum Sink {
    Out,
    Err,
}

fn prefixed(sink: Sink, prefix: &str, color: AnsiColors, msg: &str) {
    match sink {
        Sink::Out => {
            if atty::is(atty::Stream::Stdout) {
                println!("{} {}", prefix.color(color).bold(), msg);
            } else {
                println!("{prefix} {msg}");
            }
        }
        Sink::Err => {
            if atty::is(atty::Stream::Stderr) {
                eprintln!("{} {}", prefix.color(color).bold(), msg);
            } else {
                eprintln!("{prefix} {msg}");
            }
        }
    }
}

pub fn print_info(msg: &str) {
    prefixed(Sink::Out, "info:", AnsiColors::Cyan, msg);
}

pub fn print_success(msg: &str) {
    prefixed(Sink::Out, "ok:", AnsiColors::Green, msg);
}

pub fn print_warn(msg: &str) {
    prefixed(Sink::Err, "warn:", AnsiColors::Yellow, msg);
}

pub fn print_error(msg: &str) {
    prefixed(Sink::Err, "error:", AnsiColors::Red, msg);
}

/// Plain line without a prefix, for listings and results.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
