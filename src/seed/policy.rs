use crate::QuestionType;

/// Marks awarded for a correct answer and deducted for a wrong one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marks {
    pub marks: f64,
    pub negative: f64,
}

/// Fixed marking scheme keyed only on question type.
///
/// Defaults follow the usual exam convention: MCQ `1` / `-0.33`, MSQ `1` with
/// no negative marking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub mcq: Marks,
    pub msq: Marks,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        ScoringPolicy { mcq: Marks { marks: 1.0, negative: 0.33 }, msq: Marks { marks: 1.0, negative: 0.0 } }
    }
}

impl ScoringPolicy {
    pub fn marks_for(&self, qtype: QuestionType) -> Marks {
        match qtype {
            QuestionType::Mcq => self.mcq,
            QuestionType::Msq => self.msq,
        }
    }
}
