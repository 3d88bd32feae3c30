use anyhow::Result;
use strtok::buffered_chars::ReaderSource;
use strtok::comments::SlashComments;
use strtok::debug::read_all;
use strtok::pushback::Pushback;
use strtok::syntax::Category;
use strtok::token::TokenKind;
use strtok::tokenizer::{TokenError, Tokenizer};

type StrTokenizer<'s> = Tokenizer<Pushback<ReaderSource<'s>>, SlashComments>;

fn tokenizer(s: &str) -> StrTokenizer {
    Tokenizer::new(ReaderSource::from(s))
}

fn number(t: &mut StrTokenizer) -> Result<(f64, bool)> {
    assert_eq!(t.next_token()?, TokenKind::Number);
    Ok((t.numeric_value().unwrap_or(f64::NAN), t.is_integer()))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn integers_and_decimals() -> Result<()> {
    let mut t = tokenizer("123 3.14 .5 1. 0.25");
    assert_eq!(number(&mut t)?, (123., true));
    let (v, int) = number(&mut t)?;
    assert!(approx(v, 3.14));
    assert!(!int);
    assert_eq!(number(&mut t)?, (0.5, false));
    assert_eq!(number(&mut t)?, (1., false));
    assert_eq!(number(&mut t)?, (0.25, false));
    assert_eq!(t.next_token()?, TokenKind::Eof);
    Ok(())
}

#[test]
fn double_dot_after_integer() -> Result<()> {
    let mut t = tokenizer("1.. .5");
    t.syntax_mut().unset_type('.', Category::Word);
    t.syntax_mut().set_ordinary_char('.');
    assert_eq!(number(&mut t)?, (1., true));
    assert_eq!(t.next_token()?, TokenKind::Ordinary('.'));
    assert_eq!(t.next_token()?, TokenKind::Ordinary('.'));
    assert_eq!(number(&mut t)?, (0.5, false));
    assert_eq!(t.next_token()?, TokenKind::Eof);

    // with the default syntax the dots make a word
    let mut t = tokenizer("1..");
    assert_eq!(number(&mut t)?, (1., true));
    assert_eq!(t.next_token()?, TokenKind::Word);
    assert_eq!(t.string_value(), Some(".."));
    Ok(())
}

#[test]
fn signs() -> Result<()> {
    let mut t = tokenizer("-5 +.5 - 5 -x");
    assert_eq!(number(&mut t)?, (-5., true));
    assert_eq!(number(&mut t)?, (0.5, false));
    assert_eq!(t.next_token()?, TokenKind::Ordinary('-'));
    assert_eq!(number(&mut t)?, (5., true));
    assert_eq!(t.next_token()?, TokenKind::Ordinary('-'));
    assert_eq!(t.next_token()?, TokenKind::Word);
    Ok(())
}

#[test]
fn hexadecimal_and_octal() -> Result<()> {
    let mut t = tokenizer("0x1F 0Xff 017 0x 09 0 0xAl 017L");
    assert_eq!(number(&mut t)?, (31., true));
    assert_eq!(number(&mut t)?, (255., true));
    assert_eq!(number(&mut t)?, (15., true));
    assert_eq!(number(&mut t)?, (0., true));
    assert_eq!(number(&mut t)?, (9., true));
    assert_eq!(number(&mut t)?, (0., true));
    assert_eq!(number(&mut t)?, (10., true));
    assert_eq!(number(&mut t)?, (15., true));
    assert_eq!(t.next_token()?, TokenKind::Eof);

    let mut t = tokenizer("017 0x1F");
    t.syntax_mut().parse_non_decimals(false);
    assert_eq!(number(&mut t)?, (17., true));
    assert_eq!(number(&mut t)?, (0., true));
    assert_eq!(t.next_token()?, TokenKind::Word);
    assert_eq!(t.string_value(), Some("x1F"));
    Ok(())
}

#[test]
fn exponents() -> Result<()> {
    let mut t = tokenizer("1e3 2.5E-2 4e+1 -1.5e2");
    assert_eq!(number(&mut t)?, (1000., false));
    let (v, int) = number(&mut t)?;
    assert!(approx(v, 0.025));
    assert!(!int);
    assert_eq!(number(&mut t)?, (40., false));
    assert_eq!(number(&mut t)?, (-150., false));
    Ok(())
}

#[test]
fn suffixes() -> Result<()> {
    let mut t = tokenizer("10L 2f 2.5d 7l 3D");
    assert_eq!(number(&mut t)?, (10., true));
    assert_eq!(number(&mut t)?, (2., false));
    assert_eq!(number(&mut t)?, (2.5, false));
    assert_eq!(number(&mut t)?, (7., true));
    assert_eq!(number(&mut t)?, (3., false));
    assert_eq!(t.next_token()?, TokenKind::Eof);

    // `l` is not taken after a non-integer
    let mut t = tokenizer("1.5l");
    assert_eq!(number(&mut t)?, (1.5, false));
    assert_eq!(t.next_token()?, TokenKind::Word);
    assert_eq!(t.string_value(), Some("l"));
    Ok(())
}

#[test]
fn malformed_exponent() -> Result<()> {
    for s in ["1e", "1e+", "2.5E-x"] {
        let mut t = tokenizer(s);
        match t.next_token() {
            Err(e) => assert!(matches!(e.err, TokenError::MalformedNumber), "{}", e),
            Ok(k) => panic!("{:?} gave {:?}", s, k)
        }
    }
    Ok(())
}

#[test]
fn digits_only() -> Result<()> {
    let mut t = tokenizer("12-3 017 3.14 -4");
    t.syntax_mut().parse_digits_only();
    assert_eq!(number(&mut t)?, (12., true));
    assert_eq!(t.next_token()?, TokenKind::Ordinary('-'));
    assert_eq!(number(&mut t)?, (3., true));
    assert_eq!(number(&mut t)?, (17., true));
    assert_eq!(number(&mut t)?, (3., true));
    assert_eq!(t.next_token()?, TokenKind::Word);
    assert_eq!(t.string_value(), Some(".14"));
    assert_eq!(t.next_token()?, TokenKind::Ordinary('-'));
    assert_eq!(number(&mut t)?, (4., true));
    Ok(())
}

#[test]
fn numbers_off() -> Result<()> {
    let mut t = tokenizer("123 -4");
    t.syntax_mut().parse_numbers(false);
    let tokens = read_all(&mut t)?;
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, [TokenKind::Word, TokenKind::Ordinary('-'), TokenKind::Word]);
    assert_eq!(tokens[0].string_value(), Some("123"));
    assert_eq!(tokens[0].numeric_value, None);
    Ok(())
}

#[test]
fn words_with_digits() -> Result<()> {
    let mut t = tokenizer("abc123 x1.5");
    assert_eq!(t.next_token()?, TokenKind::Word);
    assert_eq!(t.string_value(), Some("abc123"));
    assert_eq!(t.next_token()?, TokenKind::Word);
    assert_eq!(t.string_value(), Some("x1.5"));
    Ok(())
}

#[test]
fn long_fractions() -> Result<()> {
    let input = format!("0.{} 0.{}5 1.25{}7 x",
                        "1".repeat(400), "0".repeat(400), "0".repeat(400));
    let mut t = tokenizer(&input);
    let (v, int) = number(&mut t)?;
    assert!(v.is_finite());
    assert!(approx(v, 1. / 9.), "{}", v);
    assert!(!int);
    assert_eq!(number(&mut t)?, (0., false));
    let (v, _) = number(&mut t)?;
    assert!(approx(v, 1.25), "{}", v);
    assert_eq!(t.next_token()?, TokenKind::Word);
    assert_eq!(t.string_value(), Some("x"));
    Ok(())
}
