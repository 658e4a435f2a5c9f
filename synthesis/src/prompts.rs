//! Prompt templates for the two personas.
//!
//! The subreddit template carries the fixed checklist of Seattle motifs;
//! the user template conditions on posting history. Structured callers
//! get the literal TITLE:/BODY: format instruction appended.

use simulator_core::{truncate_chars, Target};

/// Characters of context embedded in the user prompt. This is a raw
/// character cut and may split a word or rendered item mid-string.
pub const CONTEXT_CHAR_LIMIT: usize = 4000;

const FORMAT_INSTRUCTION: &str =
    "Return EXACTLY in this format:\nTITLE: [your title here]\nBODY: [your post body here]";

pub fn system_prompt(target: &Target, structured: bool) -> String {
    let mut prompt = match target {
        Target::Subreddit(name) => subreddit_persona(name),
        Target::User(name) => user_persona(name),
    };
    if structured {
        prompt.push_str("\n\n");
        prompt.push_str(FORMAT_INSTRUCTION);
    }
    prompt
}

pub fn user_prompt(context: &str, target: &Target) -> String {
    format!(
        "Here's recent content from {}:\n\n{}\n\nNow generate a satirical Reddit post that parodies this style. Include both a title and body.",
        target,
        truncate_chars(context, CONTEXT_CHAR_LIMIT)
    )
}

fn subreddit_persona(name: &str) -> String {
    format!(
        r#"You are a satirical Reddit post generator that parodies r/{name}.
Your job is to create a funny, exaggerated post that captures the stereotypical themes,
complaints, and vibes of this subreddit. Be creative and amusing but not mean-spirited.

Common Seattle subreddit themes to riff on:
- Housing costs / rent is too damn high
- Homeless encampments discourse
- "I saw the mountain today" posts
- Tech bro culture
- Passive-aggressive Seattle freeze
- Rain appreciation or complaints
- Traffic on I-5 / 405
- Amazon/Microsoft/tech company drama
- "Moving to Seattle, what should I know?"
- Sunset photos from Kerry Park
- Complaining about California transplants

Generate a realistic-looking Reddit post with a title and body text. Make it funny."#
    )
}

fn user_persona(name: &str) -> String {
    format!(
        r#"You are a satirical Reddit commenter that parodies user u/{name}.
Based on their posting history, create a funny exaggerated comment or post in their style.
Capture their typical topics, tone, and quirks. Be amusing but not cruel."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_selects_persona() {
        let sub = system_prompt(&Target::Subreddit("SeattleWA".to_string()), false);
        assert!(sub.starts_with("You are a satirical Reddit post generator that parodies r/SeattleWA."));
        assert!(sub.contains("Seattle freeze"));
        assert!(!sub.contains("TITLE:"));

        let user = system_prompt(&Target::User("someone".to_string()), false);
        assert!(user.contains("parodies user u/someone"));
        assert!(!user.contains("Kerry Park"));
    }

    #[test]
    fn test_structured_prompt_appends_format_instruction() {
        let prompt = system_prompt(&Target::Subreddit("Seattle".to_string()), true);
        assert!(prompt.ends_with("TITLE: [your title here]\nBODY: [your post body here]"));
    }

    #[test]
    fn test_user_prompt_embeds_context() {
        let prompt = user_prompt("Title: hello", &Target::Subreddit("Seattle".to_string()));
        assert!(prompt.starts_with("Here's recent content from r/Seattle:"));
        assert!(prompt.contains("Title: hello"));
        assert!(prompt.ends_with("Include both a title and body."));
    }

    #[test]
    fn test_context_cut_at_4000_chars() {
        let context = "c".repeat(4100);
        let prompt = user_prompt(&context, &Target::User("someone".to_string()));
        // exactly 4000 of the context's chars survive, no more
        assert!(prompt.contains(&"c".repeat(4000)));
        assert!(!prompt.contains(&"c".repeat(4001)));
    }
}
