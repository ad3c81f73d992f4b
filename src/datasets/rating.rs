/// Перевод текстовых меток сложности в классы 0..=2

/// "Elementary" → 0, "Intermediate" → 1, "Advanced" → 2,
/// метка с "C1" → 1, всё остальное (в т.ч. B1/A2) → 0
pub fn replace_rating(label: &str) -> u8 {
    if label.contains("Elementary") {
        0
    } else if label.contains("Intermediate") {
        1
    } else if label.contains("Advanced") {
        2
    } else if label.contains("C1") {
        1
    } else {
        0
    }
}
