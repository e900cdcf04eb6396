use std::env;
use std::iter::FromIterator;
use std::vec::Vec;
mod fold;
mod range;
mod stack;
mod utils;

fn usage() {
    println!("usage: <range|stack|fold> <size>")
}

fn main() {
    let args = Vec::from_iter(env::args());
    if args.len() != 3 {
        usage()
    } else {
        let size = match args[2].parse::<usize>() {
            Ok(size) => size,
            Err(_) => return usage(),
        };
        match args[1].as_ref() {
            "range" => range::run(size),
            "stack" => stack::run(size),
            "fold" => fold::run(size),
            _ => usage(),
        }
    }
}
