//! End-to-end runs of the search → fetch → filter pipeline against a mock NCBI server.

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pubmed_company_papers::eutils::{EutilsClient, EutilsConfig};
use pubmed_company_papers::models::{split_joined, PaperRow};
use pubmed_company_papers::output::OutputSink;
use pubmed_company_papers::{Pipeline, PipelineOutcome, PubmedError};

const SEARCH_PATH: &str = "/entrez/eutils/esearch.fcgi";
const FETCH_PATH: &str = "/entrez/eutils/efetch.fcgi";

const CITATIONS: &str = r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2024//EN" "https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_240101.dtd">
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">101</PMID>
      <Article PubModel="Print">
        <Journal>
          <JournalIssue CitedMedium="Internet">
            <PubDate><Year>2023</Year><Month>Mar</Month><Day>14</Day></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Small molecule inhibitors in oncology.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Doe</LastName>
            <ForeName>John</ForeName>
            <AffiliationInfo><Affiliation>XYZ Pharma Inc, e@xyz.com</Affiliation></AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">102</PMID>
      <Article PubModel="Print">
        <ArticleTitle>Academic only.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Roe</LastName>
            <ForeName>Jane</ForeName>
            <AffiliationInfo><Affiliation>University Hospital</Affiliation></AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">103</PMID>
      <Article PubModel="Print">
        <Journal>
          <JournalIssue CitedMedium="Internet">
            <PubDate><Year>2021</Year></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Mixed authorship.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Alpha</LastName>
            <ForeName>A</ForeName>
            <AffiliationInfo><Affiliation>University Hospital</Affiliation></AffiliationInfo>
          </Author>
          <Author ValidYN="Y">
            <LastName>Beta</LastName>
            <ForeName>B</ForeName>
            <AffiliationInfo><Affiliation>Acme Biotech Ltd</Affiliation></AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">104</PMID>
      <Article PubModel="Print">
        <ArticleTitle>Dual affiliation.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Gamma</LastName>
            <ForeName>G</ForeName>
            <AffiliationInfo><Affiliation>Acme Biotech Ltd</Affiliation></AffiliationInfo>
            <AffiliationInfo><Affiliation>State University</Affiliation></AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>
"#;

fn pipeline_for(server: &MockServer) -> Pipeline<EutilsClient> {
    let config = EutilsConfig {
        base_url: format!("{}/entrez/eutils", server.uri()),
        ..Default::default()
    };
    Pipeline::new(EutilsClient::new(config).expect("client should build"))
}

async fn mount_search(server: &MockServer, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "esearchresult": {"count": ids.len().to_string(), "idlist": ids}
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_filters_company_papers() {
    let server = MockServer::start().await;
    mount_search(&server, &["101", "102", "103", "104"]).await;

    Mock::given(method("GET"))
        .and(path(FETCH_PATH))
        .and(query_param("id", "101,102,103,104"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CITATIONS))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = pipeline_for(&server)
        .run("oncology")
        .await
        .expect("run should succeed");
    let papers = outcome.papers();

    let ids: Vec<&str> = papers.iter().map(|p| p.pubmed_id.as_str()).collect();
    assert_eq!(ids, vec!["101", "103", "104"]);

    // single company author with an email
    assert_eq!(papers[0].title.as_deref(), Some("Small molecule inhibitors in oncology."));
    assert_eq!(papers[0].publication_date, "2023-Mar-14");
    assert_eq!(papers[0].non_academic_authors, vec!["Doe John"]);
    assert_eq!(papers[0].company_affiliations, vec!["XYZ Pharma Inc, e@xyz.com"]);
    assert_eq!(papers[0].corresponding_email.as_deref(), Some("e@xyz.com"));

    // academic co-author, no email anywhere
    assert_eq!(papers[1].publication_date, "2021");
    assert_eq!(papers[1].non_academic_authors, vec!["Beta B"]);
    assert_eq!(papers[1].company_affiliations, vec!["Acme Biotech Ltd"]);
    assert_eq!(papers[1].corresponding_email, None);

    // one author, company and academic affiliations
    assert_eq!(papers[2].publication_date, "");
    assert_eq!(papers[2].non_academic_authors, vec!["Gamma G"]);
    assert_eq!(papers[2].company_affiliations, vec!["Acme Biotech Ltd"]);
}

#[tokio::test]
async fn test_no_results_skips_fetch() {
    let server = MockServer::start().await;
    mount_search(&server, &[]).await;

    Mock::given(method("GET"))
        .and(path(FETCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(CITATIONS))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = pipeline_for(&server)
        .run("nothing at all")
        .await
        .expect("run should succeed");
    assert_eq!(outcome, PipelineOutcome::NoResults);
}

#[tokio::test]
async fn test_fetch_failure_aborts_run() {
    let server = MockServer::start().await;
    mount_search(&server, &["101"]).await;

    Mock::given(method("GET"))
        .and(path(FETCH_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = pipeline_for(&server)
        .run("oncology")
        .await
        .expect_err("503 should fail");
    assert!(matches!(err, PubmedError::Api { code: 503, .. }));
}

#[tokio::test]
async fn test_malformed_document_aborts_run() {
    let server = MockServer::start().await;
    mount_search(&server, &["101"]).await;

    Mock::given(method("GET"))
        .and(path(FETCH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<PubmedArticleSet><PubmedArticle>"),
        )
        .mount(&server)
        .await;

    let err = pipeline_for(&server)
        .run("oncology")
        .await
        .expect_err("truncated XML should fail");
    assert!(matches!(err, PubmedError::MalformedDocument(_)));
    assert_eq!(err.exit_code(), 4);
}

#[tokio::test]
async fn test_run_to_csv_file() {
    let server = MockServer::start().await;
    mount_search(&server, &["101", "102", "103", "104"]).await;

    Mock::given(method("GET"))
        .and(path(FETCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(CITATIONS))
        .mount(&server)
        .await;

    let outcome = pipeline_for(&server)
        .run("oncology")
        .await
        .expect("run should succeed");

    let dir = TempDir::new().expect("temp dir");
    let csv_path = dir.path().join("results.csv");
    OutputSink::from_path(Some(csv_path.clone()))
        .emit(outcome.papers())
        .expect("write csv");

    let mut rdr = csv::Reader::from_path(&csv_path).expect("open csv");
    let rows = rdr
        .deserialize::<PaperRow>()
        .collect::<Result<Vec<_>, _>>()
        .expect("rows");

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].pubmed_id, "101");
    assert_eq!(rows[0].corresponding_email, "e@xyz.com");
    assert_eq!(rows[1].corresponding_email, "N/A");
    assert_eq!(split_joined(&rows[2].non_academic_authors), vec!["Gamma G"]);
}
