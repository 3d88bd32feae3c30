use anyhow::Result;
use strtok::buffered_chars::ReaderSource;
use strtok::comments::SlashComments;
use strtok::pushback::Pushback;
use strtok::source::Input;
use strtok::token::TokenKind;
use strtok::tokenizer::{TokenError, TokenErrorWithPos, Tokenizer};

type StrTokenizer<'s> = Tokenizer<Pushback<ReaderSource<'s>>, SlashComments>;

fn tokenizer(s: &str) -> StrTokenizer {
    Tokenizer::new(ReaderSource::from(s))
}

fn quoted(t: &mut StrTokenizer, left: char) -> Result<String> {
    assert_eq!(t.next_token()?, TokenKind::Quoted(left));
    Ok(t.string_value().unwrap_or_default().to_string())
}

fn error(s: &str) -> TokenErrorWithPos {
    match tokenizer(s).next_token() {
        Err(e) => e,
        Ok(k) => panic!("{:?} gave {:?}", s, k)
    }
}

#[test]
fn named_escapes() -> Result<()> {
    let mut t = tokenizer(r#""a\tb" "\n\b\r\f""#);
    assert_eq!(quoted(&mut t, '"')?, "a\tb");
    assert_eq!(quoted(&mut t, '"')?, "\n\u{8}\r\u{c}");
    assert_eq!(t.next_token()?, TokenKind::Eof);
    Ok(())
}

#[test]
fn octal_and_unicode_escapes() -> Result<()> {
    let mut t = tokenizer(r#""\101\7x" "\0619" "A\uu00e9""#);
    assert_eq!(quoted(&mut t, '"')?, "A\u{7}x");
    // at most three digits
    assert_eq!(quoted(&mut t, '"')?, "19");
    assert_eq!(quoted(&mut t, '"')?, "A\u{e9}");
    Ok(())
}

#[test]
fn literal_escapes() -> Result<()> {
    let mut t = tokenizer(r#"'it\'s' "\q\\" "say \"hi\"""#);
    assert_eq!(quoted(&mut t, '\'')?, "it's");
    assert_eq!(quoted(&mut t, '"')?, "q\\");
    assert_eq!(quoted(&mut t, '"')?, "say \"hi\"");
    Ok(())
}

#[test]
fn quote_pairs() -> Result<()> {
    let mut t = tokenizer(r"<a\b> x <c>");
    t.syntax_mut().quote_pair('<', '>', None);
    assert_eq!(quoted(&mut t, '<')?, "a\\b");
    assert_eq!(t.token().to_string(), r"QUOTE(<a\b>)");
    assert_eq!(t.next_token()?, TokenKind::Word);
    assert_eq!(quoted(&mut t, '<')?, "c");
    Ok(())
}

#[test]
fn escape_character() -> Result<()> {
    let mut t = tokenizer(r#"|a%nb| "a%nb""#);
    t.syntax_mut().set_escape_char(Some('%'));
    t.syntax_mut().quote_char('|');
    assert_eq!(quoted(&mut t, '|')?, "a\nb");
    assert_eq!(quoted(&mut t, '"')?, "a%nb");
    Ok(())
}

#[test]
fn quotes_keep_everything_else() -> Result<()> {
    let mut t = tokenizer("\"a /* b */ 12\n c\" d");
    assert_eq!(quoted(&mut t, '"')?, "a /* b */ 12\n c");
    assert_eq!(t.next_token()?, TokenKind::Word);
    Ok(())
}

#[test]
fn errors() {
    let e = error("\"abc");
    assert!(matches!(e.err, TokenError::UnterminatedQuote('"')));
    assert_eq!((e.pos.line, e.pos.col), (1, 4));

    let e = error("'abc\\");
    assert!(matches!(e.err, TokenError::UnterminatedQuote('\'')));

    let e = error(r#""\u12x4""#);
    assert!(matches!(e.err, TokenError::InvalidUnicodeEscape(Input::Char('x'))));

    let e = error(r#""\ud800""#);
    assert!(matches!(e.err, TokenError::InvalidCodePoint(0xd800)));
    assert_eq!(e.to_string(), "invalid code point 55296 @1.7");
}
