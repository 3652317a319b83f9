/// Number of questions requested per quiz.
pub const QUESTION_COUNT: usize = 5;

pub const OPTION_KEYS: [&str; 4] = ["A", "B", "C", "D"];

pub fn quiz_prompt(topic: &str) -> String {
    format!(
        "Generate a quiz with exactly {count} multiple-choice questions about \"{topic}\".

Rules:
1. Every question must test a distinct fact or concept about the topic.
2. Every question must have exactly four options labeled A, B, C and D.
3. Exactly one option is correct. Give it in \"correctAnswer\" as the option letter only (A, B, C or D).
4. Vary the position of the correct answer across the questions.
5. Keep options short and plausible. Avoid \"all of the above\" and \"none of the above\".
6. Return only the JSON array described by the response schema, with no prose or markdown.",
        count = QUESTION_COUNT,
        topic = topic
    )
}
