use std::fs;

use toml::{Table, Value};

// Keys the bundled config must define, with the TOML type each one needs
const SCHEMA: &[(&str, &str, Kind)] = &[
    ("links", "new_tab", Kind::Bool),
    ("links", "rel", Kind::Str),
    ("code", "show_language", Kind::Bool),
    ("blocks", "render_spacers", Kind::Bool),
    ("table", "ragged_rows", Kind::OneOf(&["pad", "as_is"])),
    ("list", "indent_rem", Kind::Float),
];

enum Kind {
    Bool,
    Str,
    Float,
    OneOf(&'static [&'static str]),
}

fn check(section: &str, key: &str, kind: &Kind, value: Option<&Value>) -> Result<(), String> {
    let value = value.ok_or_else(|| format!("missing [{section}] {key}"))?;
    let ok = match (kind, value) {
        (Kind::Bool, Value::Boolean(_)) => true,
        (Kind::Str, Value::String(_)) => true,
        (Kind::Float, Value::Float(_) | Value::Integer(_)) => true,
        (Kind::OneOf(allowed), Value::String(s)) => allowed.contains(&s.as_str()),
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(format!("bad value for [{section}] {key}: {value}"))
    }
}

fn main() {
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");
    let table = match content.parse::<Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    for (section, key, kind) in SCHEMA {
        let value = table
            .get(*section)
            .and_then(Value::as_table)
            .and_then(|section| section.get(*key));
        if let Err(e) = check(section, key, kind, value) {
            panic!("Invalid default_config.toml: {}", e);
        }
    }
}
