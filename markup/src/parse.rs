use crate::ast::Document;

#[derive(Debug, thiserror::Error)]
#[error("ParseError on line {line_no} ('{line}'): {msg}")]
pub struct Error {
    msg: String,
    pos: usize,
    line_no: usize,
    line: String,
}

impl Error {
    pub(crate) fn new(text: &str, pos: usize, msg: String) -> Self {
        // isolate the line in question:
        let before = &text[0..pos];
        let after = &text[pos..text.len()];
        let prefix: String = before.chars().rev().take_while(|&c| c != '\n').collect();
        let prefix: String = prefix.chars().rev().collect();
        let suffix: String = after.chars().take_while(|&c| c != '\n').collect();
        Self {
            msg,
            pos,
            line_no: before.matches('\n').count() + 1,
            line: prefix + &suffix,
        }
    }

    /// Byte offset of the error in the parsed text.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// 1-based line number of the error.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

/// Parse a complete document.
/// Elements may be nested at most [`MAX_DEPTH`](crate::MAX_DEPTH) levels deep.
pub fn parse(text: &str) -> Result<Document<'_>, Error> {
    let body = text.strip_prefix('\u{feff}').unwrap_or(text);
    let bom = text.len() - body.len();
    parse_body(body).map_err(|mut e| {
        e.pos += bom;
        e
    })
}

fn parse_body(text: &str) -> Result<Document<'_>, Error> {
    use combine::EasyParser;
    let (tokens, _remainder) = document::tokens().easy_parse(text).map_err(|e| {
        let pos = e.position.translate_position(text);
        // since converting combine's errors is a lifetime nightmare,
        // we just stringify the error before returning it.
        let e = e.map_position(|p| p.translate_position(text));
        Error::new(text, pos, format!("{}", e))
    })?;
    let root = crate::tree::build(text, tokens)?;
    Ok(Document { root })
}

// all slices in the tree point into `text`:
pub(crate) fn offset(text: &str, slice: &str) -> usize {
    slice.as_ptr() as usize - text.as_ptr() as usize
}

pub mod prelude {
    pub use combine::parser::char::{char, string};
    pub use combine::parser::range::{recognize, take_until_range};
    pub use combine::*;
}

pub mod util {

    use super::prelude::*;
    use combine::parser::char::space;

    fn is_name_char(c: char) -> bool {
        c == '_' || c == ':' || c == '-' || c == '.' || c.is_alphanumeric()
    }

    p! {
        whitespace() -> (), {
            skip_many1(space())
        }
    }

    wrapper! {
        lex(parser), {
            optional(whitespace()).with(parser).skip(optional(whitespace()))
        }
    }

    p! {
        name_start() -> char, {
            satisfy(|c: char| c == '_' || c == ':' || c.is_alphabetic())
        }
    }

    p! {
        name() -> &'a str, {
            recognize(name_start().and(skip_many(satisfy(is_name_char))))
        }
    }

    #[cfg(test)]
    mod test {
        use anyhow::Result;
        use combine::parser::char::char;
        use combine::EasyParser;
        #[test]
        fn test_name() -> Result<()> {
            assert_eq!("tlLogic", super::name().easy_parse("tlLogic").unwrap().0);
            assert_eq!(
                ("xsi:noNamespace", " rest"),
                super::name().easy_parse("xsi:noNamespace rest").unwrap()
            );
            assert_eq!("_a-b.c1", super::name().easy_parse("_a-b.c1").unwrap().0);
            assert!(super::name().easy_parse("1phase").is_err());
            assert!(super::name().easy_parse("-phase").is_err());
            Ok(())
        }
        #[test]
        fn test_whitespace() -> Result<()> {
            assert_eq!(
                ((), "<net>"),
                super::whitespace().easy_parse(" \n\t <net>").unwrap()
            );
            assert!(super::whitespace().easy_parse("x").is_err());
            Ok(())
        }
        #[test]
        fn test_lex() -> Result<()> {
            assert_eq!('=', super::lex(char('=')).easy_parse(" = ").unwrap().0);
            assert_eq!('=', super::lex(char('=')).easy_parse("=").unwrap().0);
            Ok(())
        }
    }
}

mod literal {

    use super::prelude::*;

    wrapper! {
        double_quotes(parser), {
            char('"').with(parser).skip(char('"'))
        }
    }

    wrapper! {
        single_quotes(parser), {
            char('\'').with(parser).skip(char('\''))
        }
    }

    p! {
        quoted_value() -> &'a str, {
            choice!(
                double_quotes(recognize(skip_many(none_of("\"<".chars())))),
                single_quotes(recognize(skip_many(none_of("'<".chars()))))
            )
        }
    }

    #[cfg(test)]
    mod test {
        use anyhow::Result;
        use combine::EasyParser;
        #[test]
        fn test_quoted_value() -> Result<()> {
            assert_eq!("GrGr", super::quoted_value().easy_parse("\"GrGr\"").unwrap().0);
            assert_eq!("GrGr", super::quoted_value().easy_parse("'GrGr'").unwrap().0);
            assert_eq!(
                "say \"hi\"",
                super::quoted_value().easy_parse("'say \"hi\"'").unwrap().0
            );
            assert_eq!("", super::quoted_value().easy_parse("\"\"").unwrap().0);
            assert!(super::quoted_value().easy_parse("GrGr").is_err());
            assert!(super::quoted_value().easy_parse("\"a<b\"").is_err());
            Ok(())
        }
    }
}

mod misc {

    use super::prelude::*;

    p! {
        comment() -> &'a str, {
            attempt(string("<!--")).with(take_until_range("-->")).skip(string("-->"))
        }
    }

    p! {
        instruction() -> &'a str, {
            attempt(string("<?")).with(take_until_range("?>")).skip(string("?>"))
        }
    }

    p! {
        cdata() -> &'a str, {
            attempt(string("<![CDATA[")).with(take_until_range("]]>")).skip(string("]]>"))
        }
    }

    // internal subsets ('[...]') are rejected when the tree is built.
    p! {
        doctype() -> &'a str, {
            attempt(string("<!DOCTYPE")).with(take_until_range(">")).skip(char('>'))
        }
    }

    p! {
        text() -> &'a str, {
            recognize(skip_many1(none_of("<".chars())))
        }
    }

}

mod tag {

    use super::literal::quoted_value;
    use super::prelude::*;
    use super::util::{lex, name, whitespace};
    use crate::ast::Attribute;
    use crate::tree::Token;

    p! {
        attribute() -> Attribute<'a>, {
            name()
                .skip(lex(char('=')))
                .and(quoted_value())
                .map(|(name, raw)| Attribute::undecoded(name, raw))
        }
    }

    p! {
        start_tag() -> Token<'a>, {
            char('<')
                .with(name())
                .and(many(attempt(whitespace().with(attribute()))))
                .skip(optional(whitespace()))
                .and(choice!(
                    string("/>").map(|_| true),
                    char('>').map(|_| false)
                ))
                .map(|((name, attributes), empty)| Token::Start {
                    name,
                    attributes,
                    empty,
                })
        }
    }

    p! {
        end_tag() -> &'a str, {
            attempt(string("</")).with(name()).skip(optional(whitespace())).skip(char('>'))
        }
    }

    #[cfg(test)]
    mod test {
        use crate::ast::Attribute;
        use crate::tree::Token;
        use anyhow::Result;
        use combine::EasyParser;
        #[test]
        fn test_attribute() -> Result<()> {
            assert_eq!(
                Attribute::undecoded("state", "GGrr"),
                super::attribute().easy_parse("state = \"GGrr\"").unwrap().0
            );
            Ok(())
        }
        #[test]
        fn test_start_tag() -> Result<()> {
            assert_eq!(
                Token::Start {
                    name: "phase",
                    attributes: vec![
                        Attribute::undecoded("duration", "31"),
                        Attribute::undecoded("state", "GGrr"),
                    ],
                    empty: true,
                },
                super::start_tag()
                    .easy_parse("<phase duration=\"31\"  state='GGrr' />")
                    .unwrap()
                    .0
            );
            assert_eq!(
                Token::Start {
                    name: "tlLogic",
                    attributes: vec![Attribute::undecoded("id", "A")],
                    empty: false,
                },
                super::start_tag().easy_parse("<tlLogic id=\"A\">").unwrap().0
            );
            assert!(super::start_tag().easy_parse("<tlLogic id=A/>").is_err());
            assert!(super::start_tag().easy_parse("< tlLogic>").is_err());
            Ok(())
        }
        #[test]
        fn test_end_tag() -> Result<()> {
            assert_eq!(
                ("tlLogic", "tail"),
                super::end_tag().easy_parse("</tlLogic >tail").unwrap()
            );
            Ok(())
        }
    }
}

mod document {
    use super::misc::{cdata, comment, doctype, instruction, text};
    use super::prelude::*;
    use super::tag::{end_tag, start_tag};
    use crate::ast::Node;
    use crate::tree::Token;

    p! {
        token() -> Token<'a>, {
            choice!(
                comment().map(|c| Token::Node(Node::Comment(c))),
                cdata().map(|t| Token::Node(Node::Text(t))),
                instruction().map(|i| Token::Node(Node::Instruction(i))),
                doctype().map(Token::Doctype),
                end_tag().map(Token::End),
                start_tag(),
                text().map(|t| Token::Node(Node::Text(t)))
            )
        }
    }

    p! {
        tokens() -> Vec<Token<'a>>, {
            many(token()).skip(eof())
        }
    }
}

#[cfg(test)]
mod test {
    use crate::ast::Node;
    use anyhow::Result;

    const NET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- generated -->
<net version="1.9">
    <tlLogic id="A" type="static" programID="0" offset="0">
        <phase duration="31" state="GrGr"/>
        <phase duration="4"  state="yryr"/>
    </tlLogic>
    <tlLogic id="B &amp; C" type="static">
        <phase duration="31" state="rrrr"/>
    </tlLogic>
</net>
"#;

    #[test]
    fn test_parse_document() -> Result<()> {
        let doc = super::parse(NET)?;
        assert_eq!("net", doc.root.name);
        let ids: Vec<_> = doc.root.child_elements().map(|e| e.attr("id")).collect();
        assert_eq!(vec![Some("A"), Some("B & C")], ids);
        Ok(())
    }

    #[test]
    fn test_children_in_order() -> Result<()> {
        let doc = super::parse(
            "<tlLogic id=\"A\">\n  <phase state=\"Gr\"/><!-- c -->\n</tlLogic >",
        )?;
        let el = &doc.root;
        assert_eq!(Some("tlLogic"), el.close);
        assert_eq!(4, el.children.len());
        assert_eq!(Node::Text("\n  "), el.children[0]);
        assert_eq!(Node::Comment(" c "), el.children[2]);
        let phases: Vec<_> = el.child_elements().map(|e| e.attr("state")).collect();
        assert_eq!(vec![Some("Gr")], phases);
        assert_eq!(None, el.child_elements().next().unwrap().close);
        Ok(())
    }

    #[test]
    fn test_doctype_before_root() -> Result<()> {
        let doc = super::parse(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE net>\n<net><tlLogic id=\"A\"/></net>",
        )?;
        assert_eq!(1, doc.root.child_elements().count());
        Ok(())
    }

    #[test]
    fn test_doctype_rejected() {
        let e = super::parse("<!DOCTYPE net [<!ELEMENT net ANY>]>\n<net/>").unwrap_err();
        assert!(e.to_string().contains("internal DTD subsets"), "{e}");
        assert!(super::parse("<net><!DOCTYPE net></net>").is_err());
        assert!(super::parse("<net/><!DOCTYPE net>").is_err());
    }

    #[test]
    fn test_bom_is_ignored() -> Result<()> {
        let doc = super::parse("\u{feff}<additional/>")?;
        assert_eq!("additional", doc.root.name);
        Ok(())
    }

    #[test]
    fn test_error_pos_counts_bom() {
        let text = "\u{feff}<net a=\"x&bogus;\"/>";
        let e = super::parse(text).unwrap_err();
        assert_eq!(text.find('&').unwrap(), e.pos());
        assert_eq!(1, e.line_no());
    }

    #[test]
    fn test_mismatched_end_tag() {
        let e = super::parse("<net>\n  <tlLogic id=\"A\">\n  </tllogic>\n</net>").unwrap_err();
        assert_eq!(3, e.line_no());
        assert!(e.to_string().contains("'</tllogic>'"), "{e}");
    }

    #[test]
    fn test_bad_entity_position() {
        let text = "<net a=\"x&bogus;\"/>";
        let e = super::parse(text).unwrap_err();
        assert_eq!(text.find('&').unwrap(), e.pos());
    }

    #[test]
    fn test_duplicate_attribute() {
        assert!(super::parse("<phase state=\"G\" state=\"r\"/>").is_err());
    }

    #[test]
    fn test_not_well_formed() {
        assert!(super::parse("").is_err());
        assert!(super::parse("just text").is_err());
        assert!(super::parse("<a/><b/>").is_err());
        assert!(super::parse("<a/></a>").is_err());
        let e = super::parse("<net>\n<tlLogic id=\"A\">\n").unwrap_err();
        assert_eq!(3, e.line_no());
    }

    fn nested(depth: usize) -> String {
        let mut text = String::from("<net>");
        text.push_str(&"<g>".repeat(depth));
        text.push_str("<tlLogic id=\"A\"><phase state=\"G\"/></tlLogic>");
        text.push_str(&"</g>".repeat(depth));
        text.push_str("</net>");
        text
    }

    #[test]
    fn test_deep_nesting() -> Result<()> {
        // net + groups + tlLogic + phase, right at the limit:
        let depth = crate::MAX_DEPTH - 3;
        let text = nested(depth);
        let doc = super::parse(&text)?;
        assert_eq!(1, doc.root.find_all("tlLogic").len());
        Ok(())
    }

    #[test]
    fn test_too_deep() {
        let text = nested(crate::MAX_DEPTH);
        let e = super::parse(&text).unwrap_err();
        assert!(e.to_string().contains("nested"), "{e}");

        let e = super::parse(&nested(50 * crate::MAX_DEPTH)).unwrap_err();
        assert!(e.to_string().contains("nested"), "{e}");
    }
}
