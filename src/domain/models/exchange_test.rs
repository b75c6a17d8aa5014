use super::ExchangeFailure;
use super::ExchangeResult;

#[test]
fn it_formats_failures() {
    insta::assert_snapshot!(ExchangeFailure::Status(500).to_string(), @"backend returned status 500");
    insta::assert_snapshot!(
        ExchangeFailure::Transport("connection refused".to_string()).to_string(),
        @"could not reach the backend: connection refused"
    );
    insta::assert_snapshot!(
        ExchangeFailure::Malformed("missing field `query`".to_string()).to_string(),
        @"backend returned a malformed response: missing field `query`"
    );
}

#[test]
fn it_converts_failures_into_results() {
    let res: ExchangeResult = ExchangeFailure::Status(502).into();
    assert_eq!(
        res,
        ExchangeResult::Failure {
            reason: ExchangeFailure::Status(502)
        }
    );
}
