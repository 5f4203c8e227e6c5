use serde::Deserialize;

/// Story categories known to the archive, in menu order.
pub const CATEGORIES: &[&str] = &[
    "subway_ghost",
    "abandoned_building",
    "campus_horror",
    "rental_mystery",
    "night_taxi",
    "hospital_ward",
    "elevator_incident",
    "mirror_realm",
];

/// Human-readable label for a category slug. Unknown slugs fall back
/// to the uppercased slug so new server-side categories still render.
pub fn display_name(category: &str) -> String {
    match category {
        "subway_ghost" => "Subway Ghosts".to_string(),
        "abandoned_building" => "Abandoned Buildings".to_string(),
        "campus_horror" => "Campus Horror".to_string(),
        "rental_mystery" => "Rental Mysteries".to_string(),
        "night_taxi" => "Night Taxis".to_string(),
        "hospital_ward" => "Hospital Wards".to_string(),
        "elevator_incident" => "Elevator Incidents".to_string(),
        "mirror_realm" => "Mirror Realm".to_string(),
        other => other.to_uppercase(),
    }
}

/// Profile archetype derived from a user's most-clicked category,
/// shown on the profile card.
pub fn profile_type(top_category: &str) -> &'static str {
    match top_category {
        "subway_ghost" => "URBAN EXPLORER",
        "abandoned_building" => "RUIN HUNTER",
        "cursed_object" => "ARTIFACT SEEKER",
        "missing_person" => "INVESTIGATOR",
        "time_anomaly" => "REALITY BENDER",
        "campus_horror" => "STUDENT WITNESS",
        "rental_mystery" => "TENANT SURVIVOR",
        "night_taxi" => "NIGHT WANDERER",
        "hospital_ward" => "MEDICAL ANOMALY",
        "elevator_incident" => "VERTICAL TRAVELER",
        "mirror_realm" => "REFLECTION WALKER",
        _ => "UNKNOWN ENTITY",
    }
}

/// One entry of the user's click-interest ranking.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryStat {
    pub category: String,
    #[serde(default)]
    pub clicks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_known_and_unknown() {
        assert_eq!(display_name("night_taxi"), "Night Taxis");
        assert_eq!(display_name("sewer_song"), "SEWER_SONG");
    }

    #[test]
    fn test_profile_type_fallback() {
        assert_eq!(profile_type("mirror_realm"), "REFLECTION WALKER");
        assert_eq!(profile_type("something_new"), "UNKNOWN ENTITY");
    }
}
