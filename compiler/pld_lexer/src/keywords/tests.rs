use super::*;
use pretty_assertions::assert_eq;

#[test]
fn reserved_words() {
    assert_eq!(classify("CREATE"), Some(WordClass::Reserved));
    assert_eq!(classify("procedure"), Some(WordClass::Reserved));
    assert_eq!(classify("End"), Some(WordClass::Reserved));
    assert!(is_reserved("is"));
}

#[test]
fn non_reserved_keywords() {
    assert_eq!(classify("PACKAGE"), Some(WordClass::Keyword));
    assert_eq!(classify("body"), Some(WordClass::Keyword));
    assert_eq!(classify("AuthId"), Some(WordClass::Keyword));
    assert!(!is_reserved("name"));
}

#[test]
fn pseudo_keywords() {
    assert_eq!(classify("replace"), Some(WordClass::Pseudo));
    assert_eq!(classify("CURRENT_USER"), Some(WordClass::Pseudo));
    assert_eq!(classify("exception_init"), Some(WordClass::Pseudo));
}

#[test]
fn plain_identifiers() {
    assert_eq!(classify("emp_pkg"), None);
    assert_eq!(classify("x"), None);
    assert_eq!(classify(""), None);
}

#[test]
fn lists_do_not_overlap() {
    for word in RESERVED {
        assert!(!KEYWORDS.contains(word), "{word} is reserved and a keyword");
        assert!(!PSEUDO.contains(word), "{word} is reserved and pseudo");
    }
    for word in KEYWORDS {
        assert!(!PSEUDO.contains(word), "{word} is a keyword and pseudo");
    }
}

#[test]
fn lists_are_uppercase() {
    for word in RESERVED.iter().chain(KEYWORDS).chain(PSEUDO) {
        assert_eq!(*word, word.to_ascii_uppercase());
    }
}
