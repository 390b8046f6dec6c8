use nom::branch::alt;
use nom::bytes::complete::{is_not, tag};
use nom::character::complete::{alpha1, anychar, char, digit1, none_of};
use nom::combinator::{all_consuming, map, map_res, recognize, rest};
use nom::error::{Error as NomError, ErrorKind};
use nom::multi::{many0, separated_list0};
use nom::sequence::{delimited, preceded, separated_pair};
use nom::IResult;

use crate::types::{
    HeaderContig, HeaderFilter, HeaderFormat, HeaderInfo, HeaderKey, HeaderValue, InfoNumber,
};

pub(crate) fn info_number(input: &str) -> IResult<&str, InfoNumber> {
    let r: IResult<&str, usize> = map_res(digit1, |s: &str| s.parse::<usize>())(input);
    if let Ok((input, number)) = r {
        return Ok((input, InfoNumber::Count(number)));
    }
    let (remaining, symbol) = alt((alpha1, tag(".")))(input)?;
    let number = match symbol {
        "A" => InfoNumber::AlternateAlleles,
        "R" => InfoNumber::Alleles,
        "G" => InfoNumber::Genotypes,
        "." => InfoNumber::Unknown,
        _ => return Err(nom::Err::Error(NomError::new(input, ErrorKind::Alt))),
    };
    Ok((remaining, number))
}

/// A double-quoted value, with `\"` and `\\` unescaped.
fn string(input: &str) -> IResult<&str, String> {
    let body = recognize(many0(alt((
        recognize(preceded(char('\\'), anychar)),
        recognize(none_of("\\\"")),
    ))));
    map(delimited(char('"'), body, char('"')), |s: &str| {
        s.replace("\\\"", "\"").replace("\\\\", "\\")
    })(input)
}

fn key_value(input: &str) -> IResult<&str, (&str, String)> {
    separated_pair(
        is_not("<,=>"),
        char('='),
        alt((string, map(is_not(",>"), str::to_owned))),
    )(input)
}

fn keys_and_values(input: &str) -> IResult<&str, Vec<(&str, String)>> {
    all_consuming(delimited(
        char('<'),
        separated_list0(char(','), key_value),
        char('>'),
    ))(input)
}

fn structured<'a, T>(value: &'a str) -> IResult<&'a str, T>
where
    T: TryFrom<Vec<(&'a str, String)>>,
{
    let (remaining, data) = keys_and_values(value)?;
    let parsed = T::try_from(data)
        .map_err(|_| nom::Err::Error(NomError::new(value, ErrorKind::Verify)))?;
    Ok((remaining, parsed))
}

/// Parses one `##key=value` meta-information line (without its line terminator).
pub(crate) fn header_entry(line: &str) -> IResult<&str, (HeaderKey, HeaderValue)> {
    let (input, (key, value)) =
        preceded(tag("##"), separated_pair(is_not("="), char('='), rest))(line)?;
    let value = match key {
        "INFO" => HeaderValue::Info(structured::<HeaderInfo>(value)?.1),
        "FORMAT" => HeaderValue::Format(structured::<HeaderFormat>(value)?.1),
        "FILTER" => HeaderValue::Filter(structured::<HeaderFilter>(value)?.1),
        "contig" => HeaderValue::Contig(structured::<HeaderContig>(value)?.1),
        _ => HeaderValue::String(value.to_owned()),
    };
    Ok((input, (key, value)))
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", InfoNumber::Count(1))]
    #[case("0", InfoNumber::Count(0))]
    #[case("A", InfoNumber::AlternateAlleles)]
    #[case("R", InfoNumber::Alleles)]
    #[case("G", InfoNumber::Genotypes)]
    #[case(".", InfoNumber::Unknown)]
    fn test_info_number(#[case] input: &str, #[case] expected: InfoNumber) {
        assert_eq!(info_number(input).unwrap(), ("", expected));
    }

    #[test]
    fn test_info_number_rejects_unknown_symbol() {
        assert!(info_number("Z").is_err());
    }

    #[test]
    fn test_quoted_string_with_separators_and_escapes() {
        let (remaining, s) = string(r#""a, b=\"c\">"x"#).unwrap();
        assert_eq!(s, r#"a, b="c">"#);
        assert_eq!(remaining, "x");
        assert_eq!(string(r#""""#).unwrap().1, "");
    }

    #[test]
    fn test_header_entry_info() {
        let (_, (key, value)) = header_entry(
            r#"##INFO=<ID=AF,Number=A,Type=Float,Description="Allele Frequency, per ALT">"#,
        )
        .unwrap();
        assert_eq!(key, "INFO");
        match value {
            HeaderValue::Info(info) => {
                assert_eq!(info.id(), "AF");
                assert_eq!(info.description(), "Allele Frequency, per ALT");
            }
            other => panic!("unexpected header value {:?}", other),
        }
    }

    #[test]
    fn test_header_entry_plain() {
        let (_, (key, value)) = header_entry("##source=caller=v1.2").unwrap();
        assert_eq!(key, "source");
        assert_eq!(value, HeaderValue::String("caller=v1.2".into()));
    }

    #[rstest]
    #[case("#CHROM\tPOS")]
    #[case("##INFO=<ID=X,Number=1>")]
    #[case("##INFO=<ID=X,Number=1,Type=Integer,Description=\"unterminated")]
    #[case("##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">trailing")]
    fn test_header_entry_rejects(#[case] line: &str) {
        assert!(header_entry(line).is_err());
    }
}
