use jme_initializer::catalog::{Artifact, Library, LibraryCategory};
use jme_initializer::merge::{
    ActiveConditions, FieldInputs, FragmentSource, MergeFields, Merger, NoFragments,
};
use std::collections::HashMap;
use test_log::test;

fn test_library(key: &str, name: &str) -> Library {
    Library::new(key, name, LibraryCategory::General)
}

fn merger<'f>(
    game_name: &str,
    package_name: &str,
    libraries: &[Library],
    versions: &HashMap<String, String>,
    fragments: &'f dyn FragmentSource,
) -> Merger<'f> {
    let fields = MergeFields::resolve(&FieldInputs {
        game_name,
        package_name,
        libraries,
        jme_version: "1",
        library_versions: versions,
    });
    let conditions = ActiveConditions::new(libraries, ["SINGLEPLATFORM"]);
    Merger::new(fields, conditions, fragments)
}

fn libraries_a_and_b() -> Vec<Library> {
    vec![test_library("testLibraryA", "A test library"), test_library("testLibraryB", "B test library")]
}

fn merge_text(merger: &Merger<'_>, text: &str) -> String {
    String::from_utf8(merger.merge_file_contents(text.as_bytes()).unwrap()).unwrap()
}

#[test]
fn merges_fields_into_text() {
    let merger = merger("My Game!!", "my.excellent.company", &[], &HashMap::new(), &NoFragments);

    let text = concat!(
        "This is a test string for [GAME_NAME_FULL]. Open [GAME_NAME].java to start work.\n",
        "Also, the package is [GAME_PACKAGE], fyi\n",
    );
    let expected = concat!(
        "This is a test string for My Game!!. Open MyGame.java to start work.\n",
        "Also, the package is my.excellent.company, fyi\n",
    );
    assert_eq!(merge_text(&merger, text), expected);
}

#[test]
fn resolves_if_blocks() {
    let libraries = libraries_a_and_b();
    let merger = merger("My Game!!", "my.excellent.company", &libraries, &HashMap::new(), &NoFragments);

    let text = concat!(
        "[IF=testLibraryA][IF=testLibraryB]A test library and B test library[/IF=testLibraryB][/IF=testLibraryA]\n",
        "\n",
        "[IF=testLibraryA]A test library\n",
        "multiline[/IF=testLibraryA]\n",
        "\n",
        "[IF=nonExistent]This should not show[/IF=nonExistent]\n",
        "\n",
        "[IF=nonExistent]This should not show\n",
        "multiline\n",
        "[/IF=nonExistent]\n",
        "\n",
        "[IF=nonExistent]\n",
        "[IF=nonExistent2]\n",
        "\n",
        "This should not show\n",
        "\n",
        "[/IF=nonExistent2]\n",
        "[/IF=nonExistent]\n",
        "\n",
        "\n",
        "[IF=SINGLEPLATFORM]This text uses a profile rather than a library[/IF=SINGLEPLATFORM]\n",
        "\n",
        "[IF=nonExistent]This should not show[/IF=nonExistent][IF=testLibraryA]But this should[/IF=testLibraryA][IF=nonExistent]This should not show[/IF=nonExistent]\n",
    );
    let expected = concat!(
        "A test library and B test library\n",
        "\n",
        "A test library\n",
        "multiline\n",
        "\n",
        "\n",
        "\n",
        "\n",
        "\n",
        "This text uses a profile rather than a library\n",
        "\n",
        "But this should\n",
    );
    assert_eq!(merge_text(&merger, text), expected);
}

#[test]
fn if_blocks_accept_or_lists() {
    let libraries = libraries_a_and_b();
    let merger = merger("My Game!!", "my.excellent.company", &libraries, &HashMap::new(), &NoFragments);

    let text = concat!(
        "    [IF=testLibraryA|nonExistent]This should show A[/IF=testLibraryA|nonExistent]\n",
        "    [IF=testLibraryA|testLibraryB]This should show B[/IF=testLibraryA|testLibraryB]\n",
        "    [IF=nonExistentA|nonExistentB]This should not show[/IF=nonExistentA|nonExistentB]\n",
        "    Normal text\n",
    );
    let expected = concat!(
        "    This should show A\n",
        "    This should show B\n",
        "    Normal text\n",
    );
    assert_eq!(merge_text(&merger, text), expected);
}

#[test]
fn not_blocks_show_only_for_absent_tokens() {
    let libraries = libraries_a_and_b();
    let merger = merger("My Game!!", "my.excellent.company", &libraries, &HashMap::new(), &NoFragments);

    let text = concat!(
        "    Normal Text\n",
        "    [NOT=testLibraryA]This should not show A[/NOT=testLibraryA]\n",
        "    [NOT=nonExistentC]This should show C[/NOT=nonExistentC]\n",
        "    [NOT=testLibraryB]This should not show B[/NOT=testLibraryB]\n",
        "    [NOT=nonExistentC|testLibraryB]This should not show either[/NOT=nonExistentC|testLibraryB]\n",
        "    Normal text\n",
    );
    let expected = concat!(
        "    Normal Text\n",
        "    This should show C\n",
        "    Normal text\n",
    );
    assert_eq!(merge_text(&merger, text), expected);
}

#[test]
fn artifacts_use_pinned_then_mapped_versions() {
    let library = test_library("testLibraryA", "A test library").with_artifacts(vec![
        Artifact::new("group", "artA").with_pin_version("1.2.3"),
        Artifact::new("group", "artB").with_fallback_version("1.2.3"),
    ]);
    let versions: HashMap<String, String> = [("group:artA", "1.2.4"), ("group:artB", "1.2.4")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let merger = merger("", "", &[library], &versions, &NoFragments);

    assert_eq!(
        merge_text(&merger, "    [ALL_NON_JME_DEPENDENCIES]\n"),
        "    implementation 'group:artA:1.2.3'\n    implementation 'group:artB:1.2.4'\n"
    );
}

#[test]
fn additional_repositories_are_indented_and_sorted() {
    let library = test_library("testLibraryA", "A test library").with_repositories(&["jcentre()"]);
    let merger = merger("", "", &[library], &HashMap::new(), &NoFragments);

    let text = concat!(
        "buildscript {\n",
        "    repositories {\n",
        "        [MAVEN_REPOS]\n",
        "    }\n",
        "}\n",
    );
    let expected = concat!(
        "buildscript {\n",
        "    repositories {\n",
        "        jcentre()\n",
        "        mavenCentral()\n",
        "        mavenLocal()\n",
        "    }\n",
        "}\n",
    );
    assert_eq!(merge_text(&merger, text), expected);
}

#[test]
fn fragments_are_merged_before_conditionals_and_fields() {
    let libraries = [test_library("testLibraryA", "A test library")];
    let fragments = |name: &str| match name {
        "fragA.fragment" => Some("[IF=testLibraryA]If works[/IF=testLibraryA]\n".to_string()),
        "fragB.fragment" => Some("[GAME_NAME_FULL]\n".to_string()),
        _ => None,
    };
    let merger = merger("MyGame", "", &libraries, &HashMap::new(), &fragments);

    let text = "[FRAGMENT=fragA.fragment]\nboo\n[FRAGMENT=fragB.fragment]\n";
    assert_eq!(merge_text(&merger, text), "If works\n\nboo\nMyGame\n");
}

#[test]
fn path_merge_round_trip() {
    let merger = merger("MyGame", "my.excellent.company", &[], &HashMap::new(), &NoFragments);
    assert_eq!(
        merger.merge_path("src/main/java/[GAME_PACKAGE_FOLDER]/[GAME_NAME].java"),
        "src/main/java/my/excellent/company/MyGame.java"
    );
    assert_eq!(merger.merge_path("path/something.java.jmetemplate"), "path/something.java");
    assert_eq!(merger.merge_path("[DOT]gitignore"), ".gitignore");
}

#[test]
fn nested_blocks_resolve_without_residue() {
    let both = [test_library("A", "A"), test_library("B", "B")];
    let only_a = [test_library("A", "A")];
    let text = "[IF=A][IF=B]X[/IF=B][/IF=A]";

    let merger_both = merger("G", "", &both, &HashMap::new(), &NoFragments);
    assert_eq!(merge_text(&merger_both, text), "X\n");

    let merger_a = merger("G", "", &only_a, &HashMap::new(), &NoFragments);
    assert_eq!(merge_text(&merger_a, text), "\n");
}

#[test]
fn missing_fragment_fails() {
    let merger = merger("G", "", &[], &HashMap::new(), &NoFragments);
    assert!(merger.merge_content("[FRAGMENT=nowhere]").is_err());
}

#[test]
fn interleaved_blocks_remove_failing_spans() {
    let only_a = [test_library("A", "A")];
    let merger = merger("G", "", &only_a, &HashMap::new(), &NoFragments);

    assert_eq!(merge_text(&merger, "[IF=A]x[IF=Z]y[/IF=A]z[/IF=Z]"), "x\n");
    assert_eq!(
        merge_text(&merger, "keep\n[IF=A]\n[NOT=A]secret\n[/IF=A]\nmore secret\n[/NOT=A]\nend"),
        "keep\n\nend\n"
    );
}
