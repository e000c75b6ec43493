use crate::LogLevel;

use log::LevelFilter;

#[test]
fn given_known_level_names_when_parsed_then_mapped() {
    assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel(LevelFilter::Warn));
    assert_eq!("TRACE".parse::<LogLevel>().unwrap(), LogLevel(LevelFilter::Trace));
}

#[test]
fn given_verbose_when_parsed_then_debug() {
    assert_eq!(LogLevel::parse_lenient("verbose"), LogLevel(LevelFilter::Debug));
}

#[test]
fn given_unknown_level_when_parsed_then_info() {
    assert_eq!(LogLevel::parse_lenient("chatty"), LogLevel(LevelFilter::Info));
}
