//! Built-in catalog of bookable experiences and visit timeslots

use once_cell::sync::Lazy;

use crate::models::experience::{Experience, ExperienceId, PriceTable};

/// Visit timeslots offered every day, in display order
pub const TIME_SLOTS: [&str; 4] = ["09:00 AM", "11:00 AM", "02:00 PM", "03:30 PM"];

pub const MESSAGING_DOMAIN: &str = "wa.me";
pub const WHATSAPP_NUMBER: &str = "60123109793";
pub const WEBHOOK_URL: &str = "https://script.google.com/macros/s/AKfycbw6BcZL0KDmkwT1U3tPYUJYc8-IwBkHfdiTyoeL6arOc76SBwcufVUt3ecy3brAUb1M/exec";
pub const PENDING_STATUS: &str = "Pending WhatsApp Confirmation";

static EXPERIENCES: Lazy<Vec<Experience>> = Lazy::new(|| {
    vec![
        Experience {
            id: ExperienceId::Orangutan,
            name: "Orangutan Sanctuary".to_string(),
            description: "Observe rescued orangutans in their natural habitat during feeding times."
                .to_string(),
            image: "https://images.unsplash.com/photo-1541336032412-2048a678540d?auto=format&fit=crop&q=80&w=800"
                .to_string(),
            external_url: Some(
                "https://sabahtourism.com/destination/sepilok-orangutan-rehabilitation-centre/"
                    .to_string(),
            ),
            prices: PriceTable { adult: 30, child: 15 },
        },
        Experience {
            id: ExperienceId::Sunbear,
            name: "Sun Bear Centre".to_string(),
            description: "The world's only sun bear conservation facility, home to the smallest bears."
                .to_string(),
            image: "https://images.unsplash.com/photo-1590273466070-40c466b4432d?auto=format&fit=crop&q=80&w=800"
                .to_string(),
            external_url: Some("https://www.bsbcc.org.my/".to_string()),
            prices: PriceTable { adult: 30, child: 15 },
        },
        Experience {
            id: ExperienceId::Combo,
            name: "Rainforest Combo".to_string(),
            description: "Full experience: Visit both the Orangutan Sanctuary and Sun Bear Centre."
                .to_string(),
            image: "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?auto=format&fit=crop&q=80&w=800"
                .to_string(),
            external_url: Some(
                "https://sabahtourism.com/destination/rainforest-discovery-centre-rdc/".to_string(),
            ),
            prices: PriceTable { adult: 50, child: 25 },
        },
    ]
});

/// All experiences in display order
pub fn experiences() -> &'static [Experience] {
    &EXPERIENCES
}

pub fn find(id: ExperienceId) -> Option<&'static Experience> {
    EXPERIENCES.iter().find(|e| e.id == id)
}

/// First catalog entry, selected when a session starts
pub fn default_experience() -> &'static Experience {
    &EXPERIENCES[0]
}
