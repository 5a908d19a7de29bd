use std::collections::BTreeMap;

use super::record::AnswerRecord;

/// Correct answers per subject. Subjects with no correct answer are left out.
pub fn correct_by_subject(history: &[AnswerRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in history.iter().filter(|r| r.correct) {
        *counts.entry(record.subject.clone()).or_insert(0) += 1;
    }
    counts
}
