//! Prompt Composer: turns city knowledge plus a visitor query into the
//! system prompt and message sequence for the completion call.
//!
//! Pure: identical inputs produce byte-identical prompt text. No I/O, no
//! clock reads.

use crate::chat::models::{ChatMessage, Role};
use crate::chat::prompts::{CLOSING_INSTRUCTION, GUIDE_SYSTEM_TEMPLATE, VERIFIED_HEADER_TEMPLATE};
use crate::knowledge::models::CityInfo;

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub system_prompt: String,
    pub messages: Vec<ChatMessage>,
}

/// Builds the system prompt and message sequence for one guide request.
///
/// When `info` is absent the prompt degrades to general-guide framing only,
/// with no verified-knowledge section. The message sequence is: system, then
/// the prior assistant turn verbatim if supplied, then the current query.
pub fn compose(
    city: &str,
    info: Option<&CityInfo>,
    query: &str,
    prior_turn: Option<&str>,
) -> ComposedPrompt {
    let mut system_prompt = GUIDE_SYSTEM_TEMPLATE.replace("{city}", city);

    if let Some(info) = info {
        system_prompt.push_str("\n\n");
        system_prompt.push_str(&render_verified_section(city, info));
    }

    system_prompt.push_str("\n\n");
    system_prompt.push_str(CLOSING_INSTRUCTION);

    let mut messages = vec![ChatMessage::new(Role::System, system_prompt.clone())];
    if let Some(prior) = prior_turn {
        messages.push(ChatMessage::new(Role::Assistant, prior));
    }
    messages.push(ChatMessage::new(Role::User, query));

    ComposedPrompt {
        system_prompt,
        messages,
    }
}

/// Renders the `CityInfo` fields in fixed order: description, attractions,
/// culture, practical info. Attraction sequence is display order and is
/// preserved verbatim.
fn render_verified_section(city: &str, info: &CityInfo) -> String {
    let mut out = VERIFIED_HEADER_TEMPLATE.replace("{city}", city);

    out.push_str("\n\nOverview: ");
    out.push_str(&info.description);

    out.push_str("\n\nAttractions:\n");
    let attractions = info
        .attractions
        .iter()
        .map(|a| match &a.location {
            Some(location) => format!("{}: {} (Location: {})", a.name, a.description, location),
            None => format!("{}: {}", a.name, a.description),
        })
        .collect::<Vec<_>>()
        .join("\n");
    out.push_str(&attractions);

    out.push_str("\n\nCulture:\n");
    out.push_str(&format!(
        "History: {}\nCustoms: {}\nFood: {}",
        info.culture.history, info.culture.customs, info.culture.food
    ));

    out.push_str("\n\nPractical information:\n");
    out.push_str(&format!(
        "Transportation: {}\nAccommodation: {}\nEmergency contacts: {}",
        info.practical_info.transportation,
        info.practical_info.accommodation,
        info.practical_info.emergency_contacts
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::models::{Attraction, Culture, PracticalInfo};

    fn tirana_info() -> CityInfo {
        CityInfo {
            description: "Capital and largest city of Albania.".to_string(),
            attractions: vec![
                Attraction {
                    name: "Skanderbeg Square".to_string(),
                    description: "Main plaza named after the national hero".to_string(),
                    location: Some("City centre".to_string()),
                },
                Attraction {
                    name: "Bunk'Art".to_string(),
                    description: "Cold-war bunker turned museum".to_string(),
                    location: None,
                },
            ],
            culture: Culture {
                history: "Ottoman, Italian and communist layers".to_string(),
                customs: "Strong coffee culture".to_string(),
                food: "Byrek and Tavë Kosi".to_string(),
            },
            practical_info: PracticalInfo {
                transportation: "Municipal buses and taxis".to_string(),
                accommodation: "Hotels around Skanderbeg Square".to_string(),
                emergency_contacts: "Dial 112".to_string(),
            },
        }
    }

    #[test]
    fn test_compose_is_deterministic() {
        let info = tirana_info();
        let a = compose("Tirana", Some(&info), "What food should I try?", Some("prior"));
        let b = compose("Tirana", Some(&info), "What food should I try?", Some("prior"));
        assert_eq!(a.system_prompt, b.system_prompt);
        assert_eq!(a.messages, b.messages);
    }

    #[test]
    fn test_verified_food_reaches_the_system_prompt() {
        let info = tirana_info();
        let composed = compose("Tirana", Some(&info), "What food should I try?", None);
        assert!(composed.system_prompt.contains("Byrek and Tavë Kosi"));
    }

    #[test]
    fn test_absent_info_degrades_to_general_framing() {
        let composed = compose("Atlantis", None, "What should I see?", None);
        assert!(composed.system_prompt.contains("expert local tour guide for Atlantis"));
        assert!(!composed.system_prompt.contains("Verified information"));
        // Closing instruction is still present
        assert!(composed.system_prompt.contains("Keep answers concise."));
    }

    #[test]
    fn test_attraction_order_and_location_suffix() {
        let info = tirana_info();
        let composed = compose("Tirana", Some(&info), "q", None);
        let square = composed
            .system_prompt
            .find("Skanderbeg Square: Main plaza named after the national hero (Location: City centre)")
            .unwrap();
        let bunker = composed
            .system_prompt
            .find("Bunk'Art: Cold-war bunker turned museum")
            .unwrap();
        assert!(square < bunker);
        // No stray location suffix on the attraction without one
        assert!(!composed.system_prompt.contains("museum (Location:"));
    }

    #[test]
    fn test_message_sequence_without_prior_turn() {
        let composed = compose("Tirana", None, "What should I see?", None);
        let roles: Vec<Role> = composed.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User]);
        assert_eq!(composed.messages[0].content, composed.system_prompt);
        assert_eq!(composed.messages[1].content, "What should I see?");
    }

    #[test]
    fn test_prior_turn_becomes_assistant_message_verbatim() {
        let composed = compose(
            "Tirana",
            None,
            "And where is it?",
            Some("Byrek is a savoury pastry."),
        );
        let roles: Vec<Role> = composed.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::Assistant, Role::User]);
        assert_eq!(composed.messages[1].content, "Byrek is a savoury pastry.");
    }
}
