/// Durable record key holding the serialized [`TechnologyState`](crate::TechnologyState).
pub const TECH_RECORD_KEY: &str = "tech";

/// Unlocked by "Start Construction" on the news tab; gates the construction tab.
pub const CONSTRUCTION: &str = "construction";

/// Unlocked from the construction tab; gates the research tab.
pub const RESEARCH: &str = "research";

/// Header shown above the navigation buttons.
pub const TITLE: &str = "🚀 Space Express 🚀";
