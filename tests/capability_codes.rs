use crier::utils::capability_code;

#[test]
fn spaces_become_single_dashes() {
    assert_eq!(capability_code("My Cool Producer"), "my-cool-producer");
    assert_eq!(capability_code("  A   B  C  "), "a-b-c");
}

#[test]
fn underscores_and_punctuation_collapse() {
    assert_eq!(capability_code("hello_world"), "hello-world");
    assert_eq!(capability_code("--Hello__World--"), "hello-world");
    assert_eq!(capability_code("Clock Producer"), "clock-producer");
    assert_eq!(capability_code("Console Displayer"), "console-displayer");
}

#[test]
fn unicode_is_transliterated_before_folding() {
    assert_eq!(capability_code("Smörgåsbord"), "smorgasbord");
    assert_eq!(capability_code("Déjà Vu!"), "deja-vu");
    assert_eq!(capability_code("für"), "fur");
}

#[test]
fn empty_results_fall_back_to_a_stable_code() {
    assert_eq!(capability_code(""), "capability");
    assert_eq!(capability_code("!!!"), "capability");
    assert_eq!(capability_code("---"), "capability");
}
