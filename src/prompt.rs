// Prompt construction for the dev log summary.

/// Upper bound on summary length requested from the model.
pub const MAX_SUMMARY_WORDS: usize = 20;

/// Build the dev log prompt for `author` around an event digest.
pub fn build_devlog_prompt(author: &str, digest: &str) -> String {
    format!(
        "You are {author}, a Senior Software Engineer writing a quick status update for your personal portfolio.
Analyze your following raw GitHub commit history:

Raw Data:
{digest}

Task: Write a SINGLE, casual but professional sentence about what you've been building lately.
Tone: Highly personal and authentic. Use \"I\". Sound like a human engineer talking to a friend.
Examples:
- \"I've been deep in the backend refactoring the auth middleware for better security.\"
- \"Just pushed some major updates to the rendering engine to smooth out animations.\"
- \"Spending the weekend optimizing database queries for the TaskVault project.\"

Constraint: Keep it under {MAX_SUMMARY_WORDS} words. No robotic \"{author} has updated\" language. Be you."
    )
}
