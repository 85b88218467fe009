//! Inline `style` attributes on spans.
//!
//! Only `color` and `text-decoration` have a counterpart in the output tree.
//! Everything else is collected as ignored so the caller can report it.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};

use crate::ir::Rgb;

/// A recognized style declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StyleDirective {
    Color(Rgb),
    Strikethrough,
    Underline,
}

/// Parsed inline style.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct InlineStyle {
    /// Recognized declarations, in source order.
    pub directives: Vec<StyleDirective>,
    /// Source text of declarations that were not recognized.
    pub ignored: Vec<String>,
}

/// Parse the declarations of a `style` attribute.
pub(crate) fn parse_inline_style(css: &str) -> InlineStyle {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut decl_parser = SpanDeclarationParser;
    let mut style = InlineStyle::default();

    for result in RuleBodyParser::new(&mut parser, &mut decl_parser) {
        match result {
            Ok(directives) => style.directives.extend(directives),
            Err((_, source)) => {
                let source = source.trim().trim_end_matches(';').trim();
                if !source.is_empty() {
                    style.ignored.push(source.to_string());
                }
            }
        }
    }
    style
}

struct SpanDeclarationParser;

impl<'i> DeclarationParser<'i> for SpanDeclarationParser {
    type Declaration = Vec<StyleDirective>;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let directives = match name.to_ascii_lowercase().as_str() {
            "color" => vec![StyleDirective::Color(parse_rgb_color(input)?)],
            "text-decoration" => parse_text_decoration(input)?,
            _ => return Err(input.new_custom_error(())),
        };
        input.expect_exhausted()?;
        Ok(directives)
    }
}

impl<'i> AtRuleParser<'i> for SpanDeclarationParser {
    type Prelude = ();
    type AtRule = Vec<StyleDirective>;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for SpanDeclarationParser {
    type Prelude = ();
    type QualifiedRule = Vec<StyleDirective>;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Vec<StyleDirective>, ()> for SpanDeclarationParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// `#rgb`, `#rrggbb` or `rgb(r, g, b)`. Named colors are not RGB values
/// and are rejected.
fn parse_rgb_color<'i>(input: &mut Parser<'i, '_>) -> Result<Rgb, ParseError<'i, ()>> {
    if let Ok(hash) = input.try_parse(|i| -> Result<_, ParseError<'i, ()>> {
        match i.next()? {
            Token::IDHash(h) | Token::Hash(h) => Ok(h.clone()),
            _ => Err(i.new_custom_error(())),
        }
    }) {
        return parse_hex_color(hash.as_ref()).ok_or_else(|| input.new_custom_error(()));
    }

    input.try_parse(parse_rgb_function)
}

fn parse_hex_color(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Rgb::new(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

fn parse_rgb_function<'i>(input: &mut Parser<'i, '_>) -> Result<Rgb, ParseError<'i, ()>> {
    input.expect_function_matching("rgb")?;
    input.parse_nested_block(|input| {
        let r = parse_color_component(input)?;
        input.expect_comma()?;
        let g = parse_color_component(input)?;
        input.expect_comma()?;
        let b = parse_color_component(input)?;
        Ok(Rgb::new(r, g, b))
    })
}

fn parse_color_component<'i>(input: &mut Parser<'i, '_>) -> Result<u8, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        Token::Number {
            int_value: Some(v), ..
        } => Ok((*v).clamp(0, 255) as u8),
        Token::Percentage { unit_value, .. } => {
            Ok((unit_value * 255.0).round().clamp(0.0, 255.0) as u8)
        }
        _ => Err(location.new_custom_error(())),
    }
}

/// `underline`, `line-through`, or both. `none` yields no directive.
fn parse_text_decoration<'i>(
    input: &mut Parser<'i, '_>,
) -> Result<Vec<StyleDirective>, ParseError<'i, ()>> {
    let mut directives = Vec::new();
    loop {
        let location = input.current_source_location();
        let Ok(ident) = input.try_parse(|i| i.expect_ident_cloned()) else {
            break;
        };
        match ident.as_ref() {
            "underline" => directives.push(StyleDirective::Underline),
            "line-through" => directives.push(StyleDirective::Strikethrough),
            "none" => {}
            _ => return Err(location.new_custom_error(())),
        }
    }
    Ok(directives)
}
