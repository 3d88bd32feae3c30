use anyhow::Result;
use strtok::buffered_chars::ReaderSource;
use strtok::comments::CommentPolicy;
use strtok::debug::read_all;
use strtok::source::Peek;
use strtok::syntax::{Category, SyntaxError};
use strtok::token::TokenKind::{self, *};
use strtok::tokenizer::{TokenError, Tokenizer};

fn kinds<S: Peek, C: CommentPolicy<S>>(t: &mut Tokenizer<S, C>) -> Result<Vec<TokenKind>> {
    Ok(read_all(t)?.into_iter().map(|t| t.kind).collect())
}

#[test]
fn bracket_comments_are_transparent() -> Result<()> {
    let mut t = Tokenizer::new(ReaderSource::from("1 /* x */ 2"));
    let tokens = read_all(&mut t)?;
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].numeric_value, Some(1.));
    assert_eq!(tokens[1].numeric_value, Some(2.));
    Ok(())
}

#[test]
fn line_comments() -> Result<()> {
    let mut t = Tokenizer::new(ReaderSource::from("a // c\nb//"));
    assert_eq!(kinds(&mut t)?, [Word, Word]);

    let mut t = Tokenizer::new(ReaderSource::from("a // c\nb"));
    t.eol_is_significant(true);
    assert_eq!(kinds(&mut t)?, [Word, Eol, Word]);
    Ok(())
}

#[test]
fn start_marker_does_not_end_comment() -> Result<()> {
    let mut t = Tokenizer::new(ReaderSource::from("/*/ x */ y /**/ z"));
    let tokens = read_all(&mut t)?;
    let words: Vec<_> = tokens.iter().filter_map(|t| t.string_value()).collect();
    assert_eq!(words, ["y", "z"]);
    Ok(())
}

#[test]
fn unterminated_comment() {
    let mut t = Tokenizer::new(ReaderSource::from("a /* b"));
    assert_eq!(t.next_token().unwrap(), Word);
    match t.next_token() {
        Err(e) => assert!(matches!(e.err, TokenError::UnterminatedComment(_))),
        Ok(k) => panic!("got {:?}", k)
    }
}

#[test]
fn comment_chars() -> Result<()> {
    let mut t = Tokenizer::new(ReaderSource::from("a # b /* c\nd"));
    t.comment_char('#');
    assert_eq!(kinds(&mut t)?, [Word, Word]);
    Ok(())
}

#[test]
fn switching_comments_off() -> Result<()> {
    let mut t = Tokenizer::new(ReaderSource::from("1/2//3"));
    t.disable_comments();
    assert_eq!(kinds(&mut t)?,
               [Number, Ordinary('/'), Number, Ordinary('/'), Ordinary('/'), Number]);

    let mut t = Tokenizer::new(ReaderSource::from("1/2//3 /* 4 */"));
    t.slash_slash_comments(false);
    assert_eq!(kinds(&mut t)?,
               [Number, Ordinary('/'), Number, Ordinary('/'), Ordinary('/'), Number]);

    let mut t = Tokenizer::new(ReaderSource::from("1//2\n/*3*/"));
    t.slash_star_comments(false);
    assert_eq!(kinds(&mut t)?, [Number, Ordinary('/'), Ordinary('*'), Number,
                                Ordinary('*'), Ordinary('/')]);
    Ok(())
}

#[test]
fn marker_comments() -> Result<()> {
    let mut t = Tokenizer::with_lookahead(ReaderSource::from("a -- x\nb {- y -} c -1"));
    t.comment_line("--");
    t.comment_brackets("{-", "-}");
    let tokens = read_all(&mut t)?;
    let words: Vec<_> = tokens.iter().filter_map(|t| t.string_value()).collect();
    assert_eq!(words, ["a", "b", "c"]);
    assert_eq!(tokens[3].numeric_value, Some(-1.));
    Ok(())
}

#[test]
fn long_markers() -> Result<()> {
    let mut t = Tokenizer::with_lookahead_capacity(
        ReaderSource::from("x <!-- a -- b --> y <!---->z"), 1);
    t.comment_brackets("<!--", "-->");
    let words: Vec<_> = read_all(&mut t)?.into_iter()
        .filter_map(|t| t.string_value().map(String::from))
        .collect();
    assert_eq!(words, ["x", "y", "z"]);
    assert_eq!(t.source().capacity(), 2);
    Ok(())
}

#[test]
fn default_markers() -> Result<()> {
    let mut t = Tokenizer::with_lookahead(ReaderSource::from("1 /* x */ 2 // 3"));
    assert_eq!(kinds(&mut t)?, [Number, Number]);

    let mut t = Tokenizer::with_lookahead(ReaderSource::from("a//b"));
    t.disable_comments();
    assert_eq!(kinds(&mut t)?, [Word, Ordinary('/'), Ordinary('/'), Word]);

    let mut t = Tokenizer::with_lookahead(ReaderSource::from("a;b\nc"));
    t.comment_char(';');
    assert_eq!(kinds(&mut t)?, [Word, Word]);
    Ok(())
}

#[test]
fn unterminated_marker_comment() {
    let mut t = Tokenizer::with_lookahead(ReaderSource::from("(* a *"));
    t.comment_brackets("(*", "*)");
    match t.next_token() {
        Err(e) => {
            assert!(matches!(&e.err, TokenError::UnterminatedComment(end) if end == "*)"));
            assert_eq!(e.to_string(), "end of input in comment, missing \"*)\" @1.6");
        }
        Ok(k) => panic!("got {:?}", k)
    }
}

#[test]
fn marker_precedence_has_no_comment_category() -> Result<()> {
    let mut t = Tokenizer::with_lookahead(ReaderSource::from(""));
    assert!(matches!(
        t.syntax_mut().set_type_precedence(&[Category::Word, Category::Whitespace,
                                             Category::Comment, Category::Quote,
                                             Category::Ordinary]),
        Err(SyntaxError::IllegalPrecedence(..))));
    t.syntax_mut().set_type_precedence(&[Category::Quote, Category::Word,
                                         Category::Whitespace, Category::Ordinary])?;
    assert_eq!(t.next_token()?, Eof);
    Ok(())
}
