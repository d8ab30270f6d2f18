//! Fixed option sets offered by the booking form.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ── Location ───────────────────────────────────────────────────

/// Seattle neighbourhood the evening should take place in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Area {
    NoPreference,
    Downtown,
    CapitolHill,
    QueenAnne,
    Fremont,
    Ballard,
    UniversityDistrict,
    SouthLakeUnion,
    Belltown,
    InternationalDistrict,
    WestSeattle,
    Sodo,
}

impl Area {
    pub const ALL: [Area; 12] = [
        Area::NoPreference,
        Area::Downtown,
        Area::CapitolHill,
        Area::QueenAnne,
        Area::Fremont,
        Area::Ballard,
        Area::UniversityDistrict,
        Area::SouthLakeUnion,
        Area::Belltown,
        Area::InternationalDistrict,
        Area::WestSeattle,
        Area::Sodo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoPreference => "no-preference",
            Self::Downtown => "downtown",
            Self::CapitolHill => "capitol-hill",
            Self::QueenAnne => "queen-anne",
            Self::Fremont => "fremont",
            Self::Ballard => "ballard",
            Self::UniversityDistrict => "university-district",
            Self::SouthLakeUnion => "south-lake-union",
            Self::Belltown => "belltown",
            Self::InternationalDistrict => "international-district",
            Self::WestSeattle => "west-seattle",
            Self::Sodo => "sodo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoPreference => "No preference - surprise me!",
            Self::Downtown => "Downtown Seattle",
            Self::CapitolHill => "Capitol Hill",
            Self::QueenAnne => "Queen Anne",
            Self::Fremont => "Fremont",
            Self::Ballard => "Ballard",
            Self::UniversityDistrict => "University District",
            Self::SouthLakeUnion => "South Lake Union",
            Self::Belltown => "Belltown",
            Self::InternationalDistrict => "International District",
            Self::WestSeattle => "West Seattle",
            Self::Sodo => "SODO",
        }
    }
}

// ── Scheduling ─────────────────────────────────────────────────

/// Hourly slot between 5 PM and midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum TimeSlot {
    #[serde(rename = "5:00 PM")]
    FivePm,
    #[serde(rename = "6:00 PM")]
    SixPm,
    #[serde(rename = "7:00 PM")]
    SevenPm,
    #[serde(rename = "8:00 PM")]
    EightPm,
    #[serde(rename = "9:00 PM")]
    NinePm,
    #[serde(rename = "10:00 PM")]
    TenPm,
    #[serde(rename = "11:00 PM")]
    ElevenPm,
    #[serde(rename = "12:00 AM")]
    Midnight,
}

/// Slots a night out may start at.
pub const START_SLOTS: [TimeSlot; 4] = [
    TimeSlot::FivePm,
    TimeSlot::SixPm,
    TimeSlot::SevenPm,
    TimeSlot::EightPm,
];

const AFTER_FIVE: [TimeSlot; 6] = [
    TimeSlot::SevenPm,
    TimeSlot::EightPm,
    TimeSlot::NinePm,
    TimeSlot::TenPm,
    TimeSlot::ElevenPm,
    TimeSlot::Midnight,
];

impl TimeSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FivePm => "5:00 PM",
            Self::SixPm => "6:00 PM",
            Self::SevenPm => "7:00 PM",
            Self::EightPm => "8:00 PM",
            Self::NinePm => "9:00 PM",
            Self::TenPm => "10:00 PM",
            Self::ElevenPm => "11:00 PM",
            Self::Midnight => "12:00 AM",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        AFTER_FIVE
            .iter()
            .chain(START_SLOTS.iter())
            .copied()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn is_start_slot(&self) -> bool {
        START_SLOTS.contains(self)
    }

    /// Latest-end options for a given start. Fixed lookup: at least two
    /// hours after the start, never past midnight. Empty for non-start slots.
    pub fn end_slots(&self) -> &'static [TimeSlot] {
        match self {
            Self::FivePm => &AFTER_FIVE,
            Self::SixPm => &AFTER_FIVE[1..],
            Self::SevenPm => &AFTER_FIVE[2..],
            Self::EightPm => &AFTER_FIVE[3..],
            _ => &[],
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Budget ─────────────────────────────────────────────────────

/// Per-person budget, excluding meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BudgetTier {
    #[serde(rename = "100")]
    Basic,
    #[serde(rename = "150")]
    Standard,
    #[serde(rename = "200")]
    Premium,
    #[serde(rename = "250")]
    Deluxe,
    #[serde(rename = "500")]
    Luxury,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 5] = [
        BudgetTier::Basic,
        BudgetTier::Standard,
        BudgetTier::Premium,
        BudgetTier::Deluxe,
        BudgetTier::Luxury,
    ];

    /// Whole dollars per person.
    pub fn per_person(&self) -> u32 {
        match self {
            Self::Basic => 100,
            Self::Standard => 150,
            Self::Premium => 200,
            Self::Deluxe => 250,
            Self::Luxury => 500,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Basic => "Basic package",
            Self::Standard => "Standard package",
            Self::Premium => "Premium package",
            Self::Deluxe => "Deluxe package",
            Self::Luxury => "Luxury package",
        }
    }

    pub fn is_popular(&self) -> bool {
        matches!(self, Self::Standard)
    }
}

// ── Food & drink add-ons ───────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FoodDrinkOption {
    HappyHour,
    Dinner,
    Drinks,
    Dessert,
    /// "No Thanks". Mutually exclusive with every other option.
    None,
}

impl FoodDrinkOption {
    pub const ALL: [FoodDrinkOption; 5] = [
        FoodDrinkOption::HappyHour,
        FoodDrinkOption::Dinner,
        FoodDrinkOption::Drinks,
        FoodDrinkOption::Dessert,
        FoodDrinkOption::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HappyHour => "happyHour",
            Self::Dinner => "dinner",
            Self::Drinks => "drinks",
            Self::Dessert => "dessert",
            Self::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HappyHour => "Happy Hour (apps/drinks)",
            Self::Dinner => "Dinner",
            Self::Drinks => "Drinks",
            Self::Dessert => "Dessert",
            Self::None => "No Thanks",
        }
    }

    /// Minimum per-person spend in whole dollars when an amount is entered.
    pub fn min_spend(&self) -> Option<u32> {
        match self {
            Self::HappyHour => Some(20),
            Self::Dinner => Some(40),
            Self::Drinks => Some(15),
            Self::Dessert => Some(10),
            Self::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// ── Interests ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Interest {
    SportsFitness,
    FoodDrink,
    CultureHistory,
    PerformingVisualArts,
    Activities,
    WellnessSpirituality,
    Nightlife,
    Other,
}

impl Interest {
    pub const ALL: [Interest; 8] = [
        Interest::SportsFitness,
        Interest::FoodDrink,
        Interest::CultureHistory,
        Interest::PerformingVisualArts,
        Interest::Activities,
        Interest::WellnessSpirituality,
        Interest::Nightlife,
        Interest::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SportsFitness => "sports-fitness",
            Self::FoodDrink => "food-drink",
            Self::CultureHistory => "culture-history",
            Self::PerformingVisualArts => "performing-visual-arts",
            Self::Activities => "activities",
            Self::WellnessSpirituality => "wellness-spirituality",
            Self::Nightlife => "nightlife",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SportsFitness => "Sports & Fitness: Professional Sports, Rock Climbing, etc.",
            Self::FoodDrink => "Food & Drink: Wine Tasting, Cooking Classes, etc.",
            Self::CultureHistory => "Culture & History: Museums, Walking Tours, etc.",
            Self::PerformingVisualArts => "Performing & Visual Arts: Concerts, Theater, etc.",
            Self::Activities => "Activities: Painting or Cocktail Classes, Escape Rooms, etc.",
            Self::WellnessSpirituality => "Wellness & Spirituality: Spa, Yoga, Massage, etc.",
            Self::Nightlife => "Night Life: Bar Crawl, Casino, etc.",
            Self::Other => "Other",
        }
    }

    /// Label up to the colon, for summaries.
    pub fn short_label(&self) -> &'static str {
        self.label().split(':').next().unwrap_or_default()
    }
}

// ── Special occasion ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    #[default]
    None,
    Birthday,
    Anniversary,
    Date,
    Celebration,
    Other,
}

impl Occasion {
    pub const ALL: [Occasion; 6] = [
        Occasion::None,
        Occasion::Birthday,
        Occasion::Anniversary,
        Occasion::Date,
        Occasion::Celebration,
        Occasion::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Birthday => "birthday",
            Self::Anniversary => "anniversary",
            Self::Date => "date",
            Self::Celebration => "celebration",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "No special occasion",
            Self::Birthday => "Birthday",
            Self::Anniversary => "Anniversary",
            Self::Date => "Date night",
            Self::Celebration => "General celebration",
            Self::Other => "Other",
        }
    }
}

// ── Countries (phone prefix) ───────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    #[default]
    Us,
    Ca,
    Gb,
    Au,
    De,
    Fr,
    Jp,
    Cn,
    In,
    Br,
    Mx,
    It,
    Es,
    Nl,
    Se,
    No,
    Dk,
    Fi,
}

impl Country {
    pub const ALL: [Country; 18] = [
        Country::Us,
        Country::Ca,
        Country::Gb,
        Country::Au,
        Country::De,
        Country::Fr,
        Country::Jp,
        Country::Cn,
        Country::In,
        Country::Br,
        Country::Mx,
        Country::It,
        Country::Es,
        Country::Nl,
        Country::Se,
        Country::No,
        Country::Dk,
        Country::Fi,
    ];

    /// (ISO code, display name, dial code)
    fn info(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Us => ("US", "United States", "+1"),
            Self::Ca => ("CA", "Canada", "+1"),
            Self::Gb => ("GB", "United Kingdom", "+44"),
            Self::Au => ("AU", "Australia", "+61"),
            Self::De => ("DE", "Germany", "+49"),
            Self::Fr => ("FR", "France", "+33"),
            Self::Jp => ("JP", "Japan", "+81"),
            Self::Cn => ("CN", "China", "+86"),
            Self::In => ("IN", "India", "+91"),
            Self::Br => ("BR", "Brazil", "+55"),
            Self::Mx => ("MX", "Mexico", "+52"),
            Self::It => ("IT", "Italy", "+39"),
            Self::Es => ("ES", "Spain", "+34"),
            Self::Nl => ("NL", "Netherlands", "+31"),
            Self::Se => ("SE", "Sweden", "+46"),
            Self::No => ("NO", "Norway", "+47"),
            Self::Dk => ("DK", "Denmark", "+45"),
            Self::Fi => ("FI", "Finland", "+358"),
        }
    }

    pub fn code(&self) -> &'static str {
        self.info().0
    }

    pub fn name(&self) -> &'static str {
        self.info().1
    }

    pub fn dial_code(&self) -> &'static str {
        self.info().2
    }

    /// US and Canada share the North American numbering plan layout.
    pub fn uses_nanp(&self) -> bool {
        matches!(self, Self::Us | Self::Ca)
    }

    /// Case-insensitive substring match on the country name.
    pub fn search(query: &str) -> Vec<Country> {
        let needle = query.trim().to_lowercase();
        Country::ALL
            .iter()
            .copied()
            .filter(|c| c.name().to_lowercase().contains(&needle))
            .collect()
    }
}
