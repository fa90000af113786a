//! Showcase test binary
//!
//! Registers one of everything and hands the harness to the CLI.
//!
//! ```text
//! cargo run --example showcase                       # default plan
//! cargo run --example showcase -- --prefix Test      # flat tests starting with "Test"
//! cargo run --example showcase -- --suite MathTests  # one suite
//! cargo run --example showcase -- --list
//! ```

use minitest::prelude::*;
use std::hint::black_box;
use std::process::ExitCode;

mock_fn!(static GET_RANDOM_NUMBER: i32);

/// Stand-in for a collaborator the tests isolate themselves from
fn get_random_number(mocks: &MockStore) -> i32 {
    mocks.invoke(&GET_RANDOM_NUMBER)
}

#[derive(Default)]
struct MyTestFixture;

impl Fixture for MyTestFixture {
    fn set_up(&mut self) {
        println!("Setup before test");
    }

    fn tear_down(&mut self) {
        println!("Cleanup after test");
    }
}

fn divide(a: i32, b: i32) -> Result<i32, String> {
    if b == 0 {
        Err("Divide by zero".to_string())
    } else {
        Ok(a / b)
    }
}

fn checked_sqrt(x: i32) -> f64 {
    if x < 0 {
        panic!("Negative square root");
    }
    f64::from(x).sqrt()
}

fn sort_random(len: usize) {
    let mut seed = 0x2545_f491_u64;
    let mut data: Vec<u64> = (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        })
        .collect();
    data.sort_unstable();
    black_box(data);
}

fn my_test_add(a: i32, b: i32) -> i32 {
    a + b
}

fn register_flat_tests(harness: &mut Harness) {
    let mocks = harness.mocks();
    let mocks_reset = harness.mocks();
    let mocks_reset_all = harness.mocks();

    harness
        .test("TestBoolean", || {
            check!(true);
            Ok(())
        })
        .test("TestFailure", || {
            check!(false);
            Ok(())
        })
        .test("TestException", || {
            check_panics!(panic!("error"));
            Ok(())
        })
        .test("TestSubtraction", || {
            check_eq!(5 - 3, 2);
            Ok(())
        })
        .test("DISABLED_TestIgnored", || {
            check_eq!(1 + 1, 3);
            Ok(())
        })
        .test_fixture::<MyTestFixture, _>("TestWithSetup", |_| {
            check!(1 + 1 == 2);
            Ok(())
        })
        .test("TestMockExample", move || {
            mocks.set_return(&GET_RANDOM_NUMBER, 42);
            check_eq!(get_random_number(&mocks), 42);
            Ok(())
        })
        .test("TestMockReset", move || {
            mocks_reset.reset::<i32>();
            check_eq!(get_random_number(&mocks_reset), 0);
            Ok(())
        })
        .test("TestMockResetAll", move || {
            mocks_reset_all.set_return(&GET_RANDOM_NUMBER, 100);
            mocks_reset_all.reset_all();
            check_eq!(get_random_number(&mocks_reset_all), 0);
            Ok(())
        });
}

fn register_params(harness: &mut Harness) {
    harness
        .params(
            "TestParamsAddition",
            |a: i32, b: i32, expected: i32| {
                check_eq!(a + b, expected);
                Ok(())
            },
            [(1, 2, 3), (4, 5, 9), (3, 7, 10), (6, -2, 4), (8, 3, 12)],
        )
        .params(
            "TestStringConcat",
            |a: String, b: String, expected: String| {
                check_eq!(a + &b, expected);
                Ok(())
            },
            [
                ("Hello", "World", "HelloWorld"),
                ("Mini", "Test", "MiniTest"),
                ("Unit", "Test", "UnitTest"),
            ]
            .map(|(a, b, c)| (a.to_string(), b.to_string(), c.to_string())),
        )
        .params(
            "TestExceptionHandling",
            |a: i32, b: i32| {
                if b == 0 {
                    check_err!(divide(a, b));
                } else if a < 0 {
                    check_panics!(checked_sqrt(a));
                }
                Ok(())
            },
            [(10, 0), (-4, 2)],
        )
        .params(
            "TestBoundaryCases",
            |a: i32, b: i32, expected: i32| {
                check_eq!(a.wrapping_add(b), expected);
                Ok(())
            },
            [(i32::MAX, 1, i32::MIN), (i32::MIN, -1, i32::MAX), (0, 0, 0), (-1, -1, -2)],
        );
}

fn register_suites(harness: &mut Harness) {
    harness
        .suite_test("MathTests", "TestSuiteAddition", || {
            check_eq!(2 + 3, 5);
            Ok(())
        })
        .suite_test("MathTests", "TestMultiplication", || {
            check_eq!(4 * 2, 8);
            Ok(())
        })
        .suite_test("StringTests", "TestStringLength", || {
            check_eq!("hello".len(), 5);
            Ok(())
        })
        .suite_fixture::<MyTestFixture, _>("MathTests", "TestAddition", |_| {
            check_eq!(1 + 1, 2);
            Ok(())
        })
        .suite_setup("MathTests", || println!("[SUITE SETUP] MathTests"))
        .suite_teardown("MathTests", || println!("[SUITE TEARDOWN] MathTests"));
}

fn register_benchmarks(harness: &mut Harness) {
    harness
        .bench("TestSortingPerformance", || sort_random(1_000_000), 5)
        .bench(
            "TestLoopPerformance",
            || {
                let mut sum = 0u64;
                for i in 0..1_000_000u64 {
                    sum = black_box(sum + i);
                }
                black_box(sum);
            },
            10,
        )
        .bench_with("TestLoopBenchmark", |count: u64| (0..count).sum::<u64>(), 5, (10_000u64,));
}

fn main() -> ExitCode {
    minitest::bench_function("MyTestFunction", 5, || sort_random(100_000));
    minitest::bench_function_with("MyTestAdd", 10, my_test_add, (10, 20));

    let mut harness = Harness::new();
    register_flat_tests(&mut harness);
    register_params(&mut harness);
    register_suites(&mut harness);
    register_benchmarks(&mut harness);

    minitest::main(harness)
}
