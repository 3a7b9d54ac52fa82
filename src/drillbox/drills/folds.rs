pub fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v)
}

pub fn concat<S: AsRef<str>>(parts: &[S]) -> String {
    parts.iter().fold(String::new(), |mut acc, part| {
        acc.push_str(part.as_ref());
        acc
    })
}
