use aho_corasick::AhoCorasick;
use rayon::prelude::*;

use crate::config::{SignatureConfig, SignatureRule};
use crate::error::Result;
use crate::literal::exact_literals;
use crate::types::DeviceFlags;

/// One compiled user-agent signature.
///
/// Plain literal alternations go through an Aho-Corasick automaton; anything
/// needing a real regex engine (the tablet rule uses look-ahead) falls back
/// to `fancy_regex`.
pub(crate) enum Matcher {
    Literals(AhoCorasick),
    Pattern(fancy_regex::Regex),
}

impl Matcher {
    pub fn compile(rule: &SignatureRule) -> Result<Self> {
        if let Some(literals) = exact_literals(&rule.pattern) {
            let ac = AhoCorasick::builder()
                .ascii_case_insensitive(rule.case_insensitive)
                .build(&literals)?;
            return Ok(Self::Literals(ac));
        }

        let full = if rule.case_insensitive {
            format!("(?i)(?:{})", rule.pattern)
        } else {
            rule.pattern.clone()
        };
        Ok(Self::Pattern(fancy_regex::Regex::new(&full)?))
    }

    pub fn matches(&self, ua: &str) -> bool {
        match self {
            Self::Literals(ac) => ac.is_match(ua),
            // Backtrack limit errors count as no match.
            Self::Pattern(re) => re.is_match(ua).unwrap_or(false),
        }
    }
}

/// The four device-class signatures, compiled once.
pub struct Signatures {
    mobile: Matcher,
    ios: Matcher,
    android: Matcher,
    tablet: Matcher,
}

impl Signatures {
    pub fn build(config: &SignatureConfig) -> Result<Self> {
        let ((mobile, ios), (android, tablet)) = rayon::join(
            || {
                rayon::join(
                    || Matcher::compile(&config.mobile),
                    || Matcher::compile(&config.ios),
                )
            },
            || {
                rayon::join(
                    || Matcher::compile(&config.android),
                    || Matcher::compile(&config.tablet),
                )
            },
        );

        Ok(Self {
            mobile: mobile?,
            ios: ios?,
            android: android?,
            tablet: tablet?,
        })
    }

    pub fn detect(&self, ua: &str) -> DeviceFlags {
        DeviceFlags {
            is_mobile: self.mobile.matches(ua),
            is_ios: self.ios.matches(ua),
            is_android: self.android.matches(ua),
            is_tablet: self.tablet.matches(ua),
        }
    }

    /// Classify a batch of user agents in parallel. Output order follows input.
    pub fn detect_many<S: AsRef<str> + Sync>(&self, user_agents: &[S]) -> Vec<DeviceFlags> {
        user_agents
            .par_iter()
            .map(|ua| self.detect(ua.as_ref()))
            .collect()
    }
}
