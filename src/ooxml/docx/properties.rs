//! Reading and writing of run (`w:rPr`) and paragraph (`w:pPr`) properties.
//!
//! Shared by the styles part and the document body, which use the same
//! property elements.
use crate::common::unit::{
    half_points_to_pt, line_units_to_multiple, multiple_to_line_units, pt_to_half_points,
    pt_to_twips, twips_to_pt,
};
use crate::common::{Alignment, FontProperties, ParagraphProperties, RGBColor};
use crate::ooxml::error::Result;
use quick_xml::encoding::Decoder;
use quick_xml::escape::escape;
use quick_xml::events::BytesStart;
use std::fmt::Write as FmtWrite;

/// Value of the attribute with local name `name`, unescaped.
pub(crate) fn attr(e: &BytesStart, decoder: Decoder, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .and_then(|a| a.decode_and_unescape_value(decoder).ok())
        .map(|v| v.into_owned())
}

/// A toggle property such as `<w:b/>`: on unless `w:val` turns it off.
fn toggle(e: &BytesStart, decoder: Decoder) -> bool {
    !matches!(
        attr(e, decoder, b"val").as_deref(),
        Some("0" | "false" | "off" | "none")
    )
}

fn parse_twips(e: &BytesStart, decoder: Decoder, name: &[u8]) -> Option<f64> {
    attr(e, decoder, name)
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|twips| *twips >= 0)
        .map(twips_to_pt)
}

/// Apply one child element of `w:rPr` to `font`.
///
/// Returns whether the element was recognized.
pub(crate) fn apply_run_property(
    name: &[u8],
    e: &BytesStart,
    decoder: Decoder,
    font: &mut FontProperties,
) -> bool {
    match name {
        b"rFonts" => {
            if let Some(family) = attr(e, decoder, b"ascii").or_else(|| attr(e, decoder, b"hAnsi"))
            {
                font.family = Some(family);
            }
        },
        b"sz" => {
            if let Some(half_points) = attr(e, decoder, b"val").and_then(|v| v.parse::<u32>().ok())
                && half_points > 0
            {
                font.size = Some(half_points_to_pt(half_points));
            }
        },
        b"b" => font.bold = Some(toggle(e, decoder)),
        b"i" => font.italic = Some(toggle(e, decoder)),
        b"u" => font.underline = Some(toggle(e, decoder)),
        b"color" => {
            if let Some(color) = attr(e, decoder, b"val").and_then(|v| RGBColor::from_hex(&v)) {
                font.color = Some(color);
            }
        },
        _ => return false,
    }
    true
}

/// Apply one child element of `w:pPr` to `props`.
///
/// Returns whether the element was recognized.
pub(crate) fn apply_paragraph_property(
    name: &[u8],
    e: &BytesStart,
    decoder: Decoder,
    props: &mut ParagraphProperties,
) -> bool {
    match name {
        b"jc" => {
            if let Some(alignment) = attr(e, decoder, b"val").and_then(|v| Alignment::from_xml(&v))
            {
                props.alignment = Some(alignment);
            }
        },
        b"spacing" => {
            if let Some(before) = parse_twips(e, decoder, b"before") {
                props.spacing_before = Some(before);
            }
            if let Some(after) = parse_twips(e, decoder, b"after") {
                props.spacing_after = Some(after);
            }
            // Only proportional spacing maps to a line multiple
            let proportional = matches!(attr(e, decoder, b"lineRule").as_deref(), None | Some("auto"));
            if proportional
                && let Some(line) = attr(e, decoder, b"line").and_then(|v| v.parse::<i64>().ok())
                && line > 0
            {
                props.line_spacing = Some(line_units_to_multiple(line));
            }
        },
        b"ind" => {
            if let Some(left) =
                parse_twips(e, decoder, b"left").or_else(|| parse_twips(e, decoder, b"start"))
            {
                props.indentation = Some(left);
            }
        },
        _ => return false,
    }
    true
}

/// Write the children of a `w:rPr` element, in schema order.
pub(crate) fn write_run_properties(font: &FontProperties, xml: &mut String) -> Result<()> {
    if let Some(family) = &font.family {
        let family = escape(family.as_str());
        write!(xml, "<w:rFonts w:ascii=\"{family}\" w:hAnsi=\"{family}\" w:cs=\"{family}\"/>")?;
    }
    write_toggle(xml, "b", font.bold);
    write_toggle(xml, "i", font.italic);
    if let Some(color) = font.color {
        write!(xml, "<w:color w:val=\"{}\"/>", color.to_hex())?;
    }
    if let Some(size) = font.size {
        let half_points = pt_to_half_points(size);
        write!(xml, "<w:sz w:val=\"{half_points}\"/><w:szCs w:val=\"{half_points}\"/>")?;
    }
    match font.underline {
        Some(true) => xml.push_str("<w:u w:val=\"single\"/>"),
        Some(false) => xml.push_str("<w:u w:val=\"none\"/>"),
        None => {},
    }
    Ok(())
}

fn write_toggle(xml: &mut String, element: &str, value: Option<bool>) {
    match value {
        Some(true) => {
            xml.push_str("<w:");
            xml.push_str(element);
            xml.push_str("/>");
        },
        // Explicitly off, so an inherited style value cannot turn it back on
        Some(false) => {
            xml.push_str("<w:");
            xml.push_str(element);
            xml.push_str(" w:val=\"0\"/>");
        },
        None => {},
    }
}

/// Write the spacing, indentation and alignment children of a `w:pPr`
/// element, in schema order.
pub(crate) fn write_paragraph_properties(props: &ParagraphProperties, xml: &mut String) -> Result<()> {
    if props.spacing_before.is_some() || props.spacing_after.is_some() || props.line_spacing.is_some()
    {
        xml.push_str("<w:spacing");
        if let Some(before) = props.spacing_before {
            write!(xml, " w:before=\"{}\"", pt_to_twips(before))?;
        }
        if let Some(after) = props.spacing_after {
            write!(xml, " w:after=\"{}\"", pt_to_twips(after))?;
        }
        if let Some(line) = props.line_spacing {
            write!(
                xml,
                " w:line=\"{}\" w:lineRule=\"auto\"",
                multiple_to_line_units(line)
            )?;
        }
        xml.push_str("/>");
    }
    if let Some(indentation) = props.indentation {
        write!(xml, "<w:ind w:left=\"{}\"/>", pt_to_twips(indentation))?;
    }
    if let Some(alignment) = props.alignment {
        write!(xml, "<w:jc w:val=\"{}\"/>", alignment.to_xml())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    /// Feed every element of `xml` through `apply`.
    fn apply_all(xml: &str, mut apply: impl FnMut(&[u8], &BytesStart, Decoder)) {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event().unwrap() {
                Event::Empty(e) | Event::Start(e) => {
                    let name = e.local_name();
                    apply(name.as_ref(), &e, reader.decoder());
                },
                Event::Eof => break,
                _ => {},
            }
        }
    }

    #[test]
    fn test_run_properties() {
        let mut font = FontProperties::new();
        apply_all(
            r#"<w:rPr><w:rFonts w:ascii="Georgia"/><w:b/><w:i w:val="0"/><w:sz w:val="28"/><w:u w:val="single"/><w:color w:val="1F4E79"/></w:rPr>"#,
            |name, e, decoder| {
                apply_run_property(name, e, decoder, &mut font);
            },
        );
        assert_eq!(font.family.as_deref(), Some("Georgia"));
        assert_eq!(font.bold, Some(true));
        assert_eq!(font.italic, Some(false));
        assert_eq!(font.size, Some(14.0));
        assert_eq!(font.underline, Some(true));
        assert_eq!(font.color, Some(RGBColor::new(0x1F, 0x4E, 0x79)));
    }

    #[test]
    fn test_auto_color_is_ignored() {
        let mut font = FontProperties::new();
        apply_all(r#"<w:color w:val="auto"/>"#, |name, e, decoder| {
            apply_run_property(name, e, decoder, &mut font);
        });
        assert!(font.is_empty());
    }

    #[test]
    fn test_paragraph_properties() {
        let mut props = ParagraphProperties::new();
        apply_all(
            r#"<w:pPr><w:spacing w:before="240" w:after="120" w:line="360" w:lineRule="auto"/><w:ind w:left="720"/><w:jc w:val="both"/></w:pPr>"#,
            |name, e, decoder| {
                apply_paragraph_property(name, e, decoder, &mut props);
            },
        );
        assert_eq!(props.spacing_before, Some(12.0));
        assert_eq!(props.spacing_after, Some(6.0));
        assert_eq!(props.line_spacing, Some(1.5));
        assert_eq!(props.indentation, Some(36.0));
        assert_eq!(props.alignment, Some(Alignment::Justify));
    }

    #[test]
    fn test_exact_line_spacing_is_skipped() {
        let mut props = ParagraphProperties::new();
        apply_all(r#"<w:spacing w:line="280" w:lineRule="exact"/>"#, |name, e, decoder| {
            apply_paragraph_property(name, e, decoder, &mut props);
        });
        assert_eq!(props.line_spacing, None);
    }

    #[test]
    fn test_write_run_properties() {
        let font = FontProperties::new()
            .with_family("Arial")
            .with_bold(false)
            .with_size(12.0);
        let mut xml = String::new();
        write_run_properties(&font, &mut xml).unwrap();
        assert_eq!(
            xml,
            r#"<w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/><w:b w:val="0"/><w:sz w:val="24"/><w:szCs w:val="24"/>"#
        );
    }

    #[test]
    fn test_write_paragraph_properties() {
        let props = ParagraphProperties::new()
            .with_alignment(Alignment::Center)
            .with_spacing(6.0, 12.0);
        let mut xml = String::new();
        write_paragraph_properties(&props, &mut xml).unwrap();
        assert_eq!(
            xml,
            r#"<w:spacing w:before="120" w:after="240"/><w:jc w:val="center"/>"#
        );
    }
}
