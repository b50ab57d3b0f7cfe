//! Fixed vocabularies for query understanding.
//!
//! Stop words, the vendor list, severity words, and intent cue phrases
//! are static product vocabularies: built once at process start, never
//! mutated. Matching against them is substring/equality based and
//! deliberately approximate.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Literal CVE identifier, e.g. `CVE-2024-1234`, `cve_2024_1234`.
pub static CVE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)cve[-_]?\d{4}[-_]?\d+").expect("valid CVE id regex"));

/// Phrases that signal an aggregate / statistical question.
pub const STATISTICAL_CUES: &[&str] = &[
    "statistics",
    "total count",
    "how many",
    "distribution",
    "trend",
    "growth",
    "decline",
    "compare",
    "percentage",
    "percent",
    "most",
    "least",
    "average",
    "summary",
    "overview",
    "ranking",
    "rank by",
    "breakdown by",
    "each vendor",
];

/// Phrases that signal a request for concrete records.
pub const SPECIFIC_CUES: &[&str] = &[
    "cve-",
    "details",
    "specific",
    "what is",
    "describe",
    "impact",
    "vulnerability name",
    "show me",
    "give me",
    "list of",
    "what are",
    "which are",
    "cve id",
    "cve ids",
    "examples",
    "recent cves",
    "latest cves",
];

/// Phrases that raise the vendor-ranking cap to the expanded limit.
pub const ALL_VENDOR_PHRASES: &[&str] =
    &["each vendor", "all vendor", "every vendor", "list of", "breakdown"];

/// Substrings that mark a query as phishing-related.
pub const PHISHING_TERMS: &[&str] = &["phishing", "phish", "domain", "fraud"];

/// Severity words recognized in queries, lowest index = highest rank.
pub const SEVERITY_WORDS: &[&str] = &["critical", "high", "medium", "low"];

/// The fixed vendor/product vocabulary recognized in queries and used to
/// partition keywords into vendor filters vs. free text.
pub const VENDORS: &[&str] = &[
    "microsoft",
    "apple",
    "google",
    "adobe",
    "cisco",
    "oracle",
    "linux",
    "android",
    "windows",
    "chrome",
    "firefox",
    "safari",
    "ibm",
    "vmware",
    "samsung",
    "intel",
    "amd",
    "nvidia",
    "dell",
    "hp",
    "lenovo",
    "asus",
    "qualcomm",
    "broadcom",
    "redhat",
    "ubuntu",
    "debian",
    "centos",
    "fedora",
    "apache",
    "nginx",
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "elasticsearch",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "jenkins",
    "git",
    "github",
    "gitlab",
    "bitbucket",
    "npm",
    "python",
    "java",
    "nodejs",
    "php",
    "ruby",
];

/// Tokens dropped during keyword extraction: English function words,
/// polite phrases, and domain-generic nouns that match everything.
pub const STOP_WORDS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "whom", "whose", "the", "a", "an",
    "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him",
    "her", "us", "them", "my", "your", "his", "its", "our", "their", "is", "are", "was", "were",
    "be", "been", "being", "am", "do", "does", "did", "done", "doing", "have", "has", "had",
    "having", "can", "could", "may", "might", "must", "will", "would", "shall", "should", "in",
    "on", "at", "to", "for", "of", "with", "by", "from", "about", "into", "through", "during",
    "before", "after", "above", "below", "between", "under", "over", "against", "among", "and",
    "or", "but", "so", "yet", "nor", "if", "than", "because", "since", "unless", "while",
    "although", "though", "whether", "tell", "show", "give", "get", "make", "take", "go", "come",
    "see", "know", "think", "want", "need", "like", "use", "used", "find", "help", "try", "ask",
    "work", "seem", "feel", "become", "leave", "put", "mean", "keep", "let", "begin", "start",
    "run", "move", "live", "believe", "bring", "happen", "write", "provide", "sit", "stand",
    "lose", "pay", "meet", "include", "continue", "set", "learn", "change", "lead", "understand",
    "watch", "follow", "stop", "create", "speak", "read", "allow", "add", "spend", "grow", "open",
    "walk", "win", "offer", "remember", "consider", "appear", "buy", "wait", "serve", "die",
    "send", "expect", "build", "stay", "fall", "cut", "reach", "kill", "remain", "suggest",
    "raise", "something", "anything", "nothing", "everything", "someone", "anyone", "everyone",
    "nobody", "somewhere", "anywhere", "everywhere", "nowhere", "time", "person", "year", "way",
    "day", "thing", "man", "world", "life", "hand", "part", "child", "eye", "woman", "place",
    "week", "case", "point", "government", "company", "number", "group", "problem", "fact", "all",
    "other", "new", "good", "old", "great", "big", "small", "different", "large", "next", "early",
    "young", "important", "few", "public", "bad", "same", "able", "only", "just", "also", "even",
    "very", "much", "still", "already", "never", "always", "often", "sometimes", "usually",
    "really", "quite", "almost", "enough", "too", "more", "most", "less", "least",
    "vulnerability", "vulnerabilities", "cve", "cves", "security", "threat", "exploit", "attack",
    "issue", "bug", "flaw", "weakness", "statistics", "total", "display", "view", "query",
    "search", "look", "looking", "check", "checking", "id", "ids", "information", "info", "data",
    "details", "detail", "result", "results", "list", "listing", "recent", "latest", "newest",
    "current", "please", "thanks", "thank", "sorry", "excuse", "hello", "hi", "hey", "situation",
    "situations", "example", "examples", "scenario", "scenarios", "context", "contexts",
    "condition", "conditions", "type", "types", "kind", "kinds", "sort", "sorts", "etc", "e.g.",
    "i.e.",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

static VENDOR_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| VENDORS.iter().copied().collect());

/// Whether a (lower-cased) token is a stop word.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token)
}

/// Whether a (lower-cased) token names a known vendor.
pub fn is_vendor(token: &str) -> bool {
    VENDOR_SET.contains(token)
}

/// Whether a (lower-cased) token names a severity level.
pub fn is_severity_word(token: &str) -> bool {
    SEVERITY_WORDS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cve_regex_matches_separator_variants() {
        for id in ["CVE-2024-1234", "cve_2024_1234", "cve20241234", "CVE-2023-9"] {
            assert!(CVE_ID_RE.is_match(id), "{id} should match");
        }
        assert!(!CVE_ID_RE.is_match("CVE-24-1234"));
    }

    #[test]
    fn stop_words_cover_domain_generics() {
        for w in ["vulnerability", "cve", "security", "please", "tell", "about"] {
            assert!(is_stop_word(w), "{w} should be a stop word");
        }
        assert!(!is_stop_word("openssl"));
    }

    #[test]
    fn vendor_and_severity_lookups() {
        assert!(is_vendor("microsoft"));
        assert!(!is_vendor("acme"));
        assert!(is_severity_word("critical"));
        assert!(!is_severity_word("catastrophic"));
    }
}
