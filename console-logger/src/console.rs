use nu_ansi_term::Color::{Cyan, Green, Yellow};

/// Print a warning, and the data it is about, on console.
pub fn warn(message: &str, data: &str) {
    println!(
        "{} \n {} ",
        Yellow.bold().italic().paint(message),
        Yellow.paint(data)
    );
}

/// Print a titled list of key/value pairs on console, with the values aligned.
pub fn key_values<K, V>(title: &str, pairs: &[(K, V)])
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    println!("{}", Cyan.bold().paint(title));
    print!("{}", format_key_values(pairs));
}

/// Format key/value pairs as lines of `  key  value`, with the values starting in the same column.
pub fn format_key_values<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let width = pairs
        .iter()
        .map(|(key, _)| key.as_ref().chars().count())
        .max()
        .unwrap_or_default();

    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "  {}  {}\n",
                Green.paint(format!("{:width$}", key.as_ref())),
                value.as_ref()
            )
        })
        .collect()
}
