use propath::{
    create_property_name, format_path, parse_property_name, parse_property_name_with_options,
    tokenize, ErrorKind, ParseOptions, Path, Token,
};
use rstest::rstest;

fn rendered(path: &Path) -> Vec<String> {
    path.iter()
        .map(|token| match token {
            Token::Key(name) => name.to_string(),
            Token::Index(index) => format!("#{index}"),
        })
        .collect()
}

#[rstest]
#[case("a", vec!["a"])]
#[case("a.b.c", vec!["a", "b", "c"])]
#[case("a.b[2].c", vec!["a", "b", "#2", "c"])]
#[case("people[0].name.first", vec!["people", "#0", "name", "first"])]
#[case("grid[1][2]", vec!["grid", "#1", "#2"])]
#[case("friends[10]", vec!["friends", "#10"])]
#[case("with-dash.and_underscore", vec!["with-dash", "and_underscore"])]
fn parses_valid_paths(#[case] input: &str, #[case] expected: Vec<&str>) {
    let path = parse_property_name(input).unwrap_or_else(|err| panic!("parse failed: {err}"));
    assert_eq!(rendered(&path), expected);
}

#[rstest]
#[case("a")]
#[case("a.b.c")]
#[case("a.b[2].c")]
#[case("dates[1].date")]
#[case("grid[0][3].cell")]
fn format_inverts_tokenize(#[case] input: &str) {
    let path = tokenize(input).unwrap();
    assert_eq!(format_path(&path), input);
    assert_eq!(path.to_string(), input);
}

#[rstest]
#[case("a[007]", "a[7]")]
#[case("a[00]", "a[0]")]
#[case("[01].b[0002]", "[1].b[2]")]
fn leading_zeros_format_canonically(#[case] input: &str, #[case] canonical: &str) {
    let path = tokenize(input).unwrap();
    assert_eq!(format_path(&path), canonical);
    assert_eq!(tokenize(canonical).unwrap(), path);
}

#[rstest]
fn largest_index_tokenizes() {
    let path = tokenize(&format!("a[{}]", usize::MAX)).unwrap();
    assert_eq!(path.tokens(), &[Token::key("a"), Token::Index(usize::MAX)]);
}

#[rstest]
#[case("a..b")]
#[case(".a")]
#[case("a.")]
#[case("a[x]")]
#[case("a[]")]
#[case("a[-1]")]
#[case("a[ 1]")]
#[case("a[0]b")]
#[case("a[1")]
#[case("a]")]
#[case("a[[0]]")]
#[case("invalid.[1]")]
#[case("a[1.2]")]
fn rejects_malformed_paths(#[case] input: &str) {
    let err = tokenize(input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax, "{input}");
    assert_eq!(err.path.as_deref(), Some(input));
    assert!(err.location.is_some(), "{input}");
}

#[rstest]
#[case("[0].a")]
#[case("[0]")]
#[case("")]
fn strict_parse_rejects_root_forms(#[case] input: &str) {
    let err = parse_property_name(input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);

    let lenient = parse_property_name_with_options(input, &ParseOptions::lenient());
    assert!(lenient.is_ok(), "{input}");
}

#[rstest]
fn empty_path_is_root() {
    let path = tokenize("").unwrap();
    assert!(path.is_root());
    assert_eq!(format_path(&path), "");
}

#[rstest]
fn leading_index_tokenizes_leniently() {
    let path = tokenize("[0].a").unwrap();
    assert_eq!(path.tokens(), &[Token::Index(0), Token::key("a")]);
}

#[rstest]
fn from_str_is_strict() {
    assert!("a[0]".parse::<Path>().is_ok());
    assert!("[0]".parse::<Path>().is_err());
}

#[rstest]
fn create_property_name_places_separators() {
    assert_eq!(create_property_name("a", &[]), "a");
    assert_eq!(
        create_property_name("a", &[Token::key("b"), Token::Index(0), Token::key("c")]),
        "a.b[0].c"
    );
    assert_eq!(
        create_property_name("m", &[Token::Index(0), Token::Index(1)]),
        "m[0][1]"
    );
}
