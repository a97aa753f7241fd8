use grader::Tier;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleEssay {
    pub title: String,
    pub text: String,
    pub expected_tier: Tier,
}

pub fn sample_essays() -> Vec<SampleEssay> {
    vec![
        SampleEssay {
            title: "Sample Essay 1 (Good)".to_string(),
            text: "George Orwell's 1984 explores the terrifying concept of totalitarianism through the Party's absolute control. Big Brother is always watching, and the Thought Police enforce conformity. The novel also delves into the manipulation of truth, exemplified by Newspeak and the constant rewriting of history in the Ministry of Truth. Winston Smith's struggle against this oppressive regime highlights the importance of individual thought and freedom."
                .to_string(),
            expected_tier: Tier::Medium,
        },
        SampleEssay {
            title: "Sample Essay 2 (Poor)".to_string(),
            text: "This book is about a guy named Winston who lives in a really bad place. There's a big brother who watches everyone. It's confusing sometimes and the writing is a bit bad."
                .to_string(),
            expected_tier: Tier::Low,
        },
    ]
}
