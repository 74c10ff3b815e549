#![allow(clippy::unwrap_used)]

use corpex::{parse_str, render, CleanConfig, Dialect, RenderOptions, Target};

const CMDI: &str = "<?xml version=\"1.0\"?>\n<CMD CMDVersion=\"1.2\"><Header><MdCreator>erwin</MdCreator><MdCreationDate>2019-05-01</MdCreationDate></Header><Resources><Name>fame</Name></Resources></CMD>";

const PSDX: &str = "<forestGrp File=\"demo\"><forest forestId=\"1\"><eTree Label=\"IP-MAT\"><eLeaf Text=\"Hello,\"/><eLeaf Text=\"world!\"/></eTree></forest></forestGrp>";

#[test]
fn test_render_csv() {
    let options = RenderOptions {
        source: Some("demo.cmdi".to_string()),
        ..RenderOptions::default()
    };
    let out = render(CMDI, None, Target::Csv, &options).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "file,path,value");
    assert!(lines.contains(&"demo.cmdi,CMD.CMDVersion,1.2"));
    assert!(lines.contains(&"demo.cmdi,CMD.Header.MdCreator,erwin"));
    assert!(lines.contains(&"demo.cmdi,CMD.Resources.Name,fame"));
}

#[test]
fn test_render_csv_default_source() {
    let out = render("<a>x</a>", None, Target::Csv, &RenderOptions::default()).unwrap();
    assert!(out.contains("-,a,x"));
}

#[test]
fn test_render_csv_with_prefix() {
    let options = RenderOptions {
        prefix: Some("corpus".to_string()),
        ..RenderOptions::default()
    };
    let out = render("<a>x</a>", None, Target::Csv, &options).unwrap();
    assert!(out.contains(",corpus.a,x"));
}

#[test]
fn test_render_text_psdx() {
    let options = RenderOptions {
        clean: CleanConfig::new([',', '!']),
        ..RenderOptions::default()
    };
    let out = render(PSDX, None, Target::Text, &options).unwrap();
    assert_eq!(out, "Hello world\n");
}

#[test]
fn test_render_text_explicit_dialect() {
    // the generic rules see no <forest> sentences in a PSDX file
    let out = render(
        PSDX,
        Some(Dialect::Generic),
        Target::Text,
        &RenderOptions::default(),
    )
    .unwrap();
    assert_eq!(out, "");
}

#[test]
fn test_render_xml_stamp() {
    let options = RenderOptions {
        stamp: Some(("MdCreationDate".to_string(), "2020-01-31".to_string())),
        ..RenderOptions::default()
    };
    let out = render(CMDI, None, Target::Xml, &options).unwrap();
    let doc = parse_str(&out).unwrap();
    let header = doc.root.child("Header").unwrap();
    assert_eq!(header.child("MdCreationDate").unwrap().text(), "2020-01-31");
    // untouched sibling survives
    assert_eq!(header.child("MdCreator").unwrap().text(), "erwin");
}

#[test]
fn test_render_xml_round_trips() {
    let out = render(CMDI, None, Target::Xml, &RenderOptions::default()).unwrap();
    assert_eq!(parse_str(&out).unwrap(), parse_str(CMDI).unwrap());
}

#[test]
fn test_render_malformed_input() {
    let err = render("<a><b></a>", None, Target::Csv, &RenderOptions::default()).unwrap_err();
    assert!(err.is_parse());
}
