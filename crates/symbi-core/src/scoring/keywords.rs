//! Keyword vocabularies and counting.
//!
//! A keyword ending in `*` matches any token starting with the stem; anything else must
//! match the whole token. Tokens are maximal runs of alphanumeric characters, so
//! "self-verification" yields "self" and "verification".

/// Keyword set for one sub-dimension.
pub type Keywords = &'static [&'static str];

pub const MISSION: Keywords = &[
    "goal*", "mission*", "purpose*", "objective*", "aim", "aims", "target*", "explain*",
    "understand*", "align*", "consistent*", "coheren*",
];

pub const COHERENCE: Keywords = &[
    "however", "therefore", "thus", "furthermore", "moreover", "additionally", "because",
    "since", "consequently", "hence",
];

pub const TECHNICAL: Keywords = &[
    "algorithm*", "framework*", "system*", "process*", "method*", "analys*", "analyz*",
    "data", "research*", "implement*", "develop*", "architect*", "model*",
];

pub const AUTHENTICITY: Keywords = &[
    "honest*", "actually", "specific*", "example*", "experience*", "personal*", "admit*",
    "uncertain*", "note",
];

pub const VERIFICATION: Keywords = &[
    "verif*", "validat*", "confirm*", "evidence", "proof*", "source*", "cite*", "citation*",
    "reference*", "check*",
];

pub const BOUNDARY: Keywords = &[
    "boundar*", "limit*", "scope*", "constraint*", "cannot", "unable", "outside",
];

pub const SECURITY: Keywords = &[
    "secur*", "protect*", "privacy", "private", "confidential*", "safe*", "consent*", "risk*",
];

pub const LIMITATIONS: Keywords = &[
    "limitation*", "uncertain*", "might", "may", "possibly", "perhaps", "unclear", "caveat*",
    "assum*",
];

pub const STAKEHOLDER: Keywords = &[
    "stakeholder*", "user*", "people", "community", "communities", "impact*", "affect*",
    "society", "everyone", "team*",
];

pub const ETHICAL_REASONING: Keywords = &[
    "ethic*", "moral*", "fair*", "responsib*", "harm*", "benefit*", "values", "principle*",
    "justice", "rights",
];

pub const BOUNDARY_MAINTENANCE: Keywords = &[
    "boundar*", "appropriate*", "decline*", "refus*", "respect*", "consent*", "careful*",
];

pub const CREATIVITY: Keywords = &[
    "creativ*", "novel*", "innovat*", "imagin*", "original*", "idea*", "explor*", "invent*",
    "perspective*", "alternative*",
];

pub const SYNTHESIS: Keywords = &[
    "synthes*", "insight*", "connect*", "integrat*", "combin*", "emerg*", "pattern*",
    "realiz*",
];

pub const HUMAN_AGENCY: Keywords = &[
    "you", "your", "choose", "choice*", "decide*", "decision*", "control*", "prefer*",
    "option*",
];

pub const AI_CONTRIBUTION: Keywords = &[
    "suggest*", "propos*", "recommend*", "offer*", "provide*", "generat*", "draft*",
];

pub const TRANSPARENCY: Keywords = &[
    "transparen*", "clear*", "disclos*", "openly", "reason*", "why", "explain*",
];

pub const COLLABORATION: Keywords = &[
    "together", "collaborat*", "we", "our", "us", "partner*", "share*", "joint*", "feedback",
];

/// Pre-tokenized text for repeated keyword counting.
pub struct TokenizedText<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> TokenizedText<'a> {
    /// Splits lowercased text into alphanumeric tokens.
    pub fn new(text: &'a str) -> Self {
        let tokens = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .collect();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens matching any keyword in the set. Each token counts once.
    pub fn count(&self, keywords: Keywords) -> u32 {
        let hits = self
            .tokens
            .iter()
            .filter(|token| keywords.iter().any(|kw| matches_keyword(token, kw)))
            .count();
        u32::try_from(hits).unwrap_or(u32::MAX)
    }

    /// Keyword hits per 100 words.
    ///
    /// `word_count` is the filtered word count; zero yields zero density.
    pub fn density(&self, keywords: Keywords, word_count: usize) -> f64 {
        if word_count == 0 {
            return 0.0;
        }
        f64::from(self.count(keywords)) * 100.0 / word_count as f64
    }
}

fn matches_keyword(token: &str, keyword: &str) -> bool {
    match keyword.strip_suffix('*') {
        Some(stem) => token.starts_with(stem),
        None => token == keyword,
    }
}
