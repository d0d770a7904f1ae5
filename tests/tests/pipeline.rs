use domain::chat::Role;
use domain::error::RagError;
use presentation::cli::answer_file;
use presentation::report::{Reporter, CLEAN_MESSAGE, FLAGGED_LABEL};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tests::{CannedCompletion, KeywordEmbedder};

fn input_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

async fn run(
    path: &Path,
    embeddings: &KeywordEmbedder,
    completion: &CannedCompletion,
) -> (anyhow::Result<()>, String) {
    let mut out = Vec::new();
    let result = answer_file(path, embeddings, completion, &Reporter::new(false), &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

const SKY_INPUT: &str = r#"{
    "question": "What color is the sky?",
    "documents": ["The sky is blue on a clear day.", "Grass is green."]
}"#;

#[tokio::test]
async fn sky_question_end_to_end() {
    let file = input_file(SKY_INPUT);
    let embeddings = KeywordEmbedder::new(&["sky", "grass"]);
    let completion = CannedCompletion::replying(&["The sky is blue.", "No hallucinations"]);

    let (result, stdout) = run(file.path(), &embeddings, &completion).await;
    result.unwrap();

    assert_eq!(
        stdout,
        format!("Original Answer:\nThe sky is blue.\n\n{}\n", CLEAN_MESSAGE)
    );
    assert_eq!(embeddings.calls(), 3);

    let requests = completion.requests();
    assert_eq!(requests.len(), 2);
    let answer_prompt = &requests[0];
    assert_eq!(answer_prompt[0].role, Role::System);
    assert_eq!(answer_prompt[1].role, Role::User);
    assert_eq!(
        answer_prompt[1].content,
        "Document 1: The sky is blue on a clear day.\nDocument 2: Grass is green.\nQuestion: What color is the sky?"
    );
    assert_eq!(
        requests[1][1].content,
        "Document 1: The sky is blue on a clear day.\nDocument 2: Grass is green.\nQuestion: What color is the sky?\nAnswer: The sky is blue."
    );
}

#[tokio::test]
async fn flagged_verification_is_printed_in_full() {
    let file = input_file(SKY_INPUT);
    let embeddings = KeywordEmbedder::new(&["sky", "grass"]);
    let report = "Hallucination: the answer claims X, not supported.";
    let completion = CannedCompletion::replying(&["The sky is blue and X.", report]);

    let (result, stdout) = run(file.path(), &embeddings, &completion).await;
    result.unwrap();
    assert!(stdout.ends_with(&format!("{} {}\n", FLAGGED_LABEL, report)));
}

#[tokio::test]
async fn best_match_leads_even_when_listed_last() {
    let file = input_file(
        r#"{
            "question": "Why is the sky blue?",
            "documents": ["Grass is green.", "Grass needs water.", "The sky scatters blue light."]
        }"#,
    );
    let embeddings = KeywordEmbedder::new(&["sky", "grass"]);
    let completion = CannedCompletion::replying(&["Scattering.", "no hallucinations found"]);

    run(file.path(), &embeddings, &completion).await.0.unwrap();
    let prompt = &completion.requests()[0][1].content;
    assert!(prompt.starts_with("Document 1: The sky scatters blue light.\nDocument 2: "));
    assert!(!prompt.contains("Document 3"));
}

#[tokio::test]
async fn single_document_is_used_alone() {
    let file = input_file(r#"{"question": "Sky?", "documents": ["The sky is blue."]}"#);
    let embeddings = KeywordEmbedder::new(&["sky"]);
    let completion = CannedCompletion::replying(&["Blue.", "No hallucinations"]);

    run(file.path(), &embeddings, &completion).await.0.unwrap();
    assert_eq!(
        completion.requests()[0][1].content,
        "Document 1: The sky is blue.\nQuestion: Sky?"
    );
}

#[tokio::test]
async fn invalid_documents_never_reach_the_endpoint() {
    for json in [
        r#"{"question": "q", "documents": []}"#,
        r#"{"question": "q"}"#,
        r#"{"question": "q", "documents": "not a list"}"#,
    ] {
        let file = input_file(json);
        let embeddings = KeywordEmbedder::new(&["q"]);
        let completion = CannedCompletion::replying(&["unused", "unused"]);

        let (result, stdout) = run(file.path(), &embeddings, &completion).await;
        let err = result.unwrap_err();
        assert!(
            matches!(err.downcast_ref::<RagError>(), Some(RagError::Validation(_))),
            "{json}: {err}"
        );
        assert!(stdout.is_empty());
        assert_eq!(embeddings.calls(), 0);
        assert!(completion.requests().is_empty());
    }
}

#[tokio::test]
async fn malformed_json_is_an_input_error() {
    let file = input_file("{\"question\": ");
    let embeddings = KeywordEmbedder::new(&["q"]);
    let completion = CannedCompletion::replying(&[]);

    let err = run(file.path(), &embeddings, &completion).await.0.unwrap_err();
    let rag_err = err.downcast_ref::<RagError>().unwrap();
    assert!(matches!(rag_err, RagError::ParseInput { .. }));
    assert!(rag_err.is_input_error());
}

#[tokio::test]
async fn generation_failure_prints_nothing() {
    let file = input_file(SKY_INPUT);
    let embeddings = KeywordEmbedder::new(&["sky", "grass"]);
    let completion = CannedCompletion::new(vec![Err(anyhow::anyhow!("connection reset"))]);

    let (result, stdout) = run(file.path(), &embeddings, &completion).await;
    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RagError>(),
        Some(RagError::Generation(_))
    ));
    assert!(err.to_string().starts_with("Error during generation:"));
    assert!(stdout.is_empty());
    assert_eq!(completion.requests().len(), 1);
}

#[tokio::test]
async fn verification_failure_discards_the_answer() {
    let file = input_file(SKY_INPUT);
    let embeddings = KeywordEmbedder::new(&["sky", "grass"]);
    let completion = CannedCompletion::new(vec![
        Ok("The sky is blue.".to_string()),
        Err(anyhow::anyhow!("operation timed out")),
    ]);

    let (result, stdout) = run(file.path(), &embeddings, &completion).await;
    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RagError>(),
        Some(RagError::Verification(_))
    ));
    assert!(!stdout.contains("The sky is blue."));
}
