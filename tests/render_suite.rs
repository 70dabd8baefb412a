use stakeholder_venn::{
    Config, Segment, StakeholderCategories, compute_layout, render_categories, render_svg,
    segment_label_text,
};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn preview_config() -> Config {
    let mut config = Config::default();
    config.render.dpi = 48.0;
    config
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_categories_render_a_png() {
    let png = render_categories(&StakeholderCategories::default(), &preview_config())
        .expect("render failed");
    assert!(png.len() > PNG_SIGNATURE.len());
    assert_eq!(&png[..8], &PNG_SIGNATURE);
}

#[test]
fn identical_input_renders_identical_bytes() {
    let mut categories = StakeholderCategories::default();
    categories.dominante = names(&["Gobierno", "Banco Central"]);
    categories.criticos = names(&["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"]);
    let config = preview_config();
    let first = render_categories(&categories, &config).expect("first render");
    let second = render_categories(&categories, &config).expect("second render");
    assert_eq!(first, second);
}

#[test]
fn six_critical_names_collapse_to_four_plus_remainder() {
    let mut categories = StakeholderCategories::default();
    categories.criticos = names(&["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"]);
    let config = preview_config();
    let layout = compute_layout(&categories, &config.theme, &config.render);

    let critical = layout.segment(Segment::Criticos).expect("criticos label");
    assert_eq!(critical.text.text(), "7\nAlice\nBob\nCarol\nDave\n(+2 más)");

    for segment in Segment::ALL.iter().filter(|s| **s != Segment::Criticos) {
        let label = layout.segment(*segment).expect("label");
        assert_eq!(label.text.text(), segment.number().to_string());
    }

    let svg = render_svg(&layout, &config.theme, &config.render);
    for name in ["Alice", "Bob", "Carol", "Dave", "(+2 más)"] {
        assert!(svg.contains(name), "missing {name}");
    }
    assert!(!svg.contains("Frank"));
}

#[test]
fn four_or_fewer_names_are_all_listed() {
    for count in 0..=4 {
        let list: Vec<String> = (1..=count).map(|i| format!("Actor {i}")).collect();
        let text = segment_label_text(Segment::Peligroso, &list);
        for name in &list {
            assert!(text.contains(name.as_str()));
        }
        assert!(!text.contains("más"));
        assert_eq!(text.lines().count(), count + 1);
    }
}

#[test]
fn larger_lists_grow_the_image() {
    let config = preview_config();
    let empty = compute_layout(&StakeholderCategories::default(), &config.theme, &config.render);
    let mut categories = StakeholderCategories::default();
    categories.demandante = names(&["Sindicato", "ONG", "Vecinos", "Prensa"]);
    let filled = compute_layout(&categories, &config.theme, &config.render);
    assert!(filled.height >= empty.height);
}
