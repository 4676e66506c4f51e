use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::MatchType;

/// Number of scripted rounds in a date
pub const MAX_ROUNDS: u32 = 3;

const DEFAULT_PARTNER: &str = "your match";
const DEFAULT_PARTNER_TRAIT: &str = "interesting";

/// Templates for one round of a date.
///
/// Placeholders: `{partner}`, `{partner_trait}`, `{partner_response}`.
#[derive(Debug, Clone, Copy)]
pub struct RoundScript {
    pub name: &'static str,
    pub templates: &'static [&'static str],
}

static ROMANCE_ROUNDS: [RoundScript; 3] = [
    RoundScript {
        name: "First Impressions",
        templates: &[
            "You're on a first date with {partner}. They seem {partner_trait}. Introduce yourself in a way that shows your personality. What's the first thing you'd say?",
            "You just sat down across from {partner} at a cozy café. Break the ice — share something unexpected about yourself.",
            "You matched with {partner} and they seem intriguing. Send them your best opening message — be genuine, be you.",
        ],
    },
    RoundScript {
        name: "Going Deeper",
        templates: &[
            "{partner} just said: \"{partner_response}\"\n\nYou're really connecting. Share something meaningful — what's a belief you hold that most people would disagree with?",
            "{partner} just said: \"{partner_response}\"\n\nThe conversation is flowing. Tell them about a moment that changed how you see the world.",
            "{partner} just said: \"{partner_response}\"\n\nYou feel comfortable with them. What's something you're passionate about that you want them to understand?",
        ],
    },
    RoundScript {
        name: "The Spark Check",
        templates: &[
            "{partner} just said: \"{partner_response}\"\n\nThe date is winding down. Do you feel a spark? Tell {partner} honestly what you think about the connection you've had, and whether you'd want to meet again.",
            "{partner} just said: \"{partner_response}\"\n\nLast chance to make an impression. What's the one thing you want {partner} to remember about you?",
        ],
    },
];

static WORK_ROUNDS: [RoundScript; 3] = [
    RoundScript {
        name: "The Pitch",
        templates: &[
            "You're meeting {partner} as a potential collaborator. They're known for being {partner_trait}. Pitch yourself — what unique value do you bring to a partnership?",
            "You're at a professional networking event and {partner} caught your attention. What problem could you solve together?",
            "{partner} is looking for a work partner. Describe your working style and what kind of collaboration you thrive in.",
        ],
    },
    RoundScript {
        name: "The Challenge",
        templates: &[
            "{partner} just said: \"{partner_response}\"\n\nInteresting approach. Here's a scenario: you both disagree on a major project decision. How do you handle it?",
            "{partner} just said: \"{partner_response}\"\n\nNow the real test: describe a time you failed at something and what you learned. Be real.",
            "{partner} just said: \"{partner_response}\"\n\nYou need to deliver a project in 48 hours. How would you divide the work between you two?",
        ],
    },
    RoundScript {
        name: "The Verdict",
        templates: &[
            "{partner} just said: \"{partner_response}\"\n\nBased on this conversation, would you want to work with {partner}? What excites you and what concerns you about this pairing?",
            "{partner} just said: \"{partner_response}\"\n\nFinal assessment: rate your working chemistry and describe what a first project together might look like.",
        ],
    },
];

static FRIENDSHIP_ROUNDS: [RoundScript; 3] = [
    RoundScript {
        name: "The Hangout",
        templates: &[
            "You're hanging out with {partner} for the first time. They seem {partner_trait}. What do you suggest doing together?",
            "You just met {partner} at a party. You have 2 minutes to figure out if you'd be friends. Go!",
            "{partner} seems cool. Send them a message that shows your vibe — what kind of friend are you?",
        ],
    },
    RoundScript {
        name: "The Real Talk",
        templates: &[
            "{partner} just said: \"{partner_response}\"\n\nYou're getting along. Share your most controversial opinion about something mundane — pineapple on pizza level debate.",
            "{partner} just said: \"{partner_response}\"\n\nFriendship test: what's the most chaotic thing you've ever done, and would you do it again?",
            "{partner} just said: \"{partner_response}\"\n\nBe honest: what's a weird habit or interest you have that you usually don't share right away?",
        ],
    },
    RoundScript {
        name: "The Vibe Check",
        templates: &[
            "{partner} just said: \"{partner_response}\"\n\nFinal vibe check: are you and {partner} friend material? What would your friendship look like?",
            "{partner} just said: \"{partner_response}\"\n\nIf you and {partner} had a group chat, what would you name it? And what's the first meme you'd send?",
        ],
    },
];

/// A rendered prompt for one side of a date round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePrompt {
    pub round_name: &'static str,
    pub prompt: String,
}

/// Script for a round. Rounds outside 1..=3 fall back to round 1.
pub fn round_script(match_type: MatchType, round: u32) -> &'static RoundScript {
    let rounds = match match_type {
        MatchType::Romance => &ROMANCE_ROUNDS,
        MatchType::Work => &WORK_ROUNDS,
        MatchType::Friendship => &FRIENDSHIP_ROUNDS,
    };

    round
        .checked_sub(1)
        .and_then(|idx| rounds.get(idx as usize))
        .unwrap_or(&rounds[0])
}

/// Substitute the partner placeholders in a template
pub fn render_template(
    template: &str,
    partner: Option<&str>,
    partner_trait: Option<&str>,
    partner_response: Option<&str>,
) -> String {
    template
        .replace("{partner}", partner.unwrap_or(DEFAULT_PARTNER))
        .replace("{partner_trait}", partner_trait.unwrap_or(DEFAULT_PARTNER_TRAIT))
        .replace("{partner_response}", partner_response.unwrap_or(""))
}

/// Pick a random template for the round and fill in the partner details
pub fn date_prompt<R: Rng + ?Sized>(
    match_type: MatchType,
    round: u32,
    partner: Option<&str>,
    partner_trait: Option<&str>,
    partner_response: Option<&str>,
    rng: &mut R,
) -> DatePrompt {
    let script = round_script(match_type, round);
    let template = script
        .templates
        .choose(rng)
        .copied()
        .unwrap_or(script.templates[0]);

    DatePrompt {
        round_name: script.name,
        prompt: render_template(template, partner, partner_trait, partner_response),
    }
}
