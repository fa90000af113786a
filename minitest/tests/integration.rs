//! Integration tests for minitest
//!
//! These tests drive the registries through the facade end to end.

use minitest::prelude::*;
use minitest::{
    BenchmarkRegistry, CaseStatus, ExecutionPlan, MemorySink, ParamRegistry, Step, SuiteRegistry,
    TestRegistry, execute_plan,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

static GET_RANDOM_NUMBER: MockFn<i32> = MockFn::new("get_random_number");

fn addition_tests() -> TestRegistry {
    let mut tests = TestRegistry::default();
    tests
        .register("TestAddition", || {
            check_eq!(2 + 3, 5);
            Ok(())
        })
        .register("TestSubtraction", || {
            check_eq!(5 - 3, 2);
            Ok(())
        })
        .register("TestBroken", || {
            check_eq!(1 + 1, 3);
            Ok(())
        });
    tests
}

#[test]
fn test_run_all_reports_totals() {
    let summary = addition_tests().run_all();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.passed + summary.failed, summary.total);
    assert_eq!(
        summary.names(),
        vec!["TestAddition", "TestSubtraction", "TestBroken"]
    );
}

#[test]
fn test_each_case_runs_exactly_once() {
    let runs = Arc::new(AtomicUsize::new(0));
    let mut tests = TestRegistry::default();
    for i in 0..10 {
        let runs = Arc::clone(&runs);
        tests.register(format!("Case{}", i), move || {
            runs.fetch_add(1, Ordering::SeqCst);
            if i % 3 == 0 {
                fail!("case {} fails on purpose", i);
            }
            Ok(())
        });
    }

    let summary = tests.run_all();
    assert_eq!(runs.load(Ordering::SeqCst), 10);
    assert_eq!(summary.failed, 4);
    assert_eq!(summary.passed, 6);
}

#[test]
fn test_prefix_excludes_disabled_but_disabled_run_includes_it() {
    let mut tests = addition_tests();
    tests.register("DISABLED_TestIgnored", || {
        check_eq!(1 + 1, 3);
        Ok(())
    });

    let by_prefix = tests.run_by_prefix("Test");
    assert!(!by_prefix.names().contains(&"DISABLED_TestIgnored"));
    assert_eq!(by_prefix.total, 3);

    let disabled = tests.run_disabled();
    assert_eq!(disabled.names(), vec!["DISABLED_TestIgnored"]);
}

#[test]
fn test_panicking_case_is_contained() {
    let mut tests = TestRegistry::default();
    tests
        .register("TestPanics", || {
            let v: Vec<i32> = Vec::new();
            check_eq!(v[3], 0);
            Ok(())
        })
        .register("TestAfter", || Ok(()));

    let summary = tests.run_all();
    assert_eq!(summary.cases[0].status, CaseStatus::Crashed);
    assert!(
        summary.cases[0]
            .message
            .as_deref()
            .unwrap()
            .starts_with("unexpected failure: ")
    );
    assert_eq!(summary.cases[1].status, CaseStatus::Passed);
}

#[derive(Default)]
struct Workspace {
    items: Vec<u32>,
}

impl Fixture for Workspace {
    fn set_up(&mut self) {
        self.items = vec![1, 2, 3];
    }

    fn tear_down(&mut self) {
        self.items.clear();
    }
}

#[test]
fn test_fixture_gets_fresh_state() {
    let mut tests = TestRegistry::default();
    tests
        .register_fixture::<Workspace, _>("TestWithSetup", |ws| {
            check_eq!(ws.items.len(), 3);
            ws.items.push(4);
            Ok(())
        })
        .register_fixture::<Workspace, _>("TestSeesFreshFixture", |ws| {
            check_eq!(ws.items, vec![1, 2, 3]);
            Ok(())
        });

    assert!(tests.run_all().all_passed());
}

#[test]
fn test_parameterized_expansion() {
    let mut params = ParamRegistry::default();
    params.register(
        "TestParamsAddition",
        |a: i32, b: i32, expected: i32| {
            check_eq!(a + b, expected);
            Ok(())
        },
        vec![(1, 2, 3), (4, 5, 9), (3, 7, 10), (6, -2, 4), (8, 3, 12)],
    );

    let summary = params.run_all();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.cases[3].name, "TestParamsAddition(6, -2, 4)");
}

#[test]
fn test_suite_bracket_with_failures() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut suites = SuiteRegistry::default();

    let log = Arc::clone(&events);
    suites.on_setup("MathTests", move || log.lock().unwrap().push("setup"));
    let log = Arc::clone(&events);
    suites.on_teardown("MathTests", move || log.lock().unwrap().push("teardown"));

    for (name, ok) in [("A", true), ("B", false), ("C", false)] {
        let log = Arc::clone(&events);
        suites.register("MathTests", name, move || {
            log.lock().unwrap().push("case");
            check!(ok);
            Ok(())
        });
    }

    let summary = suites.run_suite("MathTests", None).unwrap();
    assert_eq!(summary.failed, 2);
    assert_eq!(
        *events.lock().unwrap(),
        vec!["setup", "case", "case", "case", "teardown"]
    );
}

#[test]
fn test_all_suites_run_and_join() {
    let sink = MemorySink::new();
    let mut suites = SuiteRegistry::new(Arc::new(sink.clone()));
    suites
        .register("MathTests", "TestSuiteAddition", || {
            check_eq!(2 + 3, 5);
            Ok(())
        })
        .register("MathTests", "TestMultiplication", || {
            check_eq!(4 * 2, 8);
            Ok(())
        })
        .register("StringTests", "TestStringLength", || {
            check_eq!("hello".len(), 5);
            Ok(())
        });

    let summaries = suites.run_all_suites().unwrap();
    let categories: Vec<_> = summaries.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(categories, vec!["MathTests", "StringTests"]);
    assert!(summaries.iter().all(|s| s.all_passed()));

    let lines = sink.lines();
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("[LOG START]")).count(),
        2
    );
    assert_eq!(lines.iter().filter(|l| *l == "[LOG END]").count(), 2);
}

#[test]
fn test_benchmark_mean() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut benches = BenchmarkRegistry::default();
    benches
        .register(
            "TestLoopPerformance",
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            5,
        )
        .register_with("MyTestAdd", |a: i32, b: i32| a + b, 1, (10, 20));

    let records = benches.run_all();
    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.mean_ms >= 0.0 && r.mean_ms.is_finite()));
}

#[test]
fn test_mock_round_trip_inside_tests() {
    let mocks = Arc::new(MockStore::new());
    let mut tests = TestRegistry::default();

    let m = Arc::clone(&mocks);
    tests.register("TestMockExample", move || {
        m.set_return(&GET_RANDOM_NUMBER, 42);
        check_eq!(m.invoke(&GET_RANDOM_NUMBER), 42);
        Ok(())
    });
    let m = Arc::clone(&mocks);
    tests.register("TestMockReset", move || {
        m.reset::<i32>();
        check_eq!(m.invoke(&GET_RANDOM_NUMBER), 0);
        Ok(())
    });
    let m = Arc::clone(&mocks);
    tests.register("TestMockResetAll", move || {
        m.set_return(&GET_RANDOM_NUMBER, 100);
        m.reset_all();
        m.reset_all();
        check_eq!(m.invoke(&GET_RANDOM_NUMBER), 0);
        Ok(())
    });

    assert!(tests.run_all().all_passed());
}

#[test]
fn test_harness_plan_end_to_end() {
    let sink = MemorySink::new();
    let mut harness = Harness::new().with_sink(Arc::new(sink.clone()));
    harness
        .test("TestBoolean", || {
            check!(true);
            Ok(())
        })
        .test("TestException", || {
            check_panics!(panic!("error"));
            Ok(())
        })
        .suite_test("MathTests", "TestSuiteAddition", || Ok(()))
        .params("TestStringConcat", |a: String, b: String, expected: String| {
            check_eq!(a + &b, expected);
            Ok(())
        }, [("Unit".to_string(), "Test".to_string(), "UnitTest".to_string())]);

    let plan = ExecutionPlan {
        steps: vec![
            Step::AllTests,
            Step::Params,
            Step::Suite {
                name: "MathTests".into(),
                test: Some("Missing".into()),
            },
            Step::AllSuites,
        ],
    };
    let report = execute_plan(&harness, &plan).unwrap();

    assert_eq!(report.summary.total, 4);
    assert_eq!(report.summary.failed, 0);
    assert_eq!(report.summary.lookup_errors, 1);
    assert!(report.has_failures());

    let json = minitest_report::generate_json_report(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["total"], 4);
    assert_eq!(value["runs"][1]["cases"][0]["name"], "TestStringConcat(Unit, Test, UnitTest)");
}
