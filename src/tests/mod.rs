#[cfg(test)]
mod formatting_tests {
    use std::cell::RefCell;
    use std::collections::{BTreeMap, VecDeque};
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;
    use std::sync::{Arc, Mutex, RwLock};

    use crate::{
        inspect_record, Complex, DumpConfig, DumpError, Dumper, Inspect, UnsupportedPolicy,
        VisibilityMode,
    };

    struct Home {
        price: i32,
        address: String,
    }

    struct Person {
        name: String,
        age: i32,
        home: Home,
    }

    inspect_record!(Home { price, pub address });
    inspect_record!(Person { pub name, pub age, pub home });

    struct Callback {
        name: String,
        func: fn(i32) -> i32,
    }

    inspect_record!(Callback { pub name, pub func });

    #[derive(PartialEq, Eq, PartialOrd, Ord)]
    struct Badge {
        label: String,
        pin: u16,
    }

    inspect_record!(Badge { pub label, pin });

    struct Link {
        id: i32,
        next: RefCell<Option<Rc<Link>>>,
    }

    inspect_record!(Link { pub id, pub next });

    impl PartialEq for Link {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    impl Eq for Link {}

    impl PartialOrd for Link {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Link {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.id.cmp(&other.id)
        }
    }

    fn create_looped_link() -> Rc<Link> {
        let link = Rc::new(Link {
            id: 1,
            next: RefCell::new(None),
        });
        *link.next.borrow_mut() = Some(link.clone());
        link
    }

    fn create_person() -> Person {
        Person {
            name: "aaa".to_string(),
            age: 10,
            home: Home {
                price: 1,
                address: "aaaaa".to_string(),
            },
        }
    }

    fn render(value: &dyn Inspect) -> String {
        Dumper::default().render(value).unwrap()
    }

    fn render_with(config: DumpConfig, value: &dyn Inspect) -> String {
        Dumper::new(config).render(value).unwrap()
    }

    #[test]
    fn test_integer_type_names() {
        assert_eq!(render(&8i32), "(i32) 8");
        assert_eq!(render(&-5i64), "(i64) -5");
        assert_eq!(render(&255u8), "(u8) 255");
        assert_eq!(render(&7usize), "(usize) 7");
        assert_eq!(render(&-1isize), "(isize) -1");
        assert_eq!(render(&u128::MAX), "(u128) 340282366920938463463374607431768211455");
    }

    #[test]
    fn test_float_and_complex() {
        assert_eq!(render(&1.244211f64), "(f64) 1.244211");
        assert_eq!(render(&-1231.23f64), "(f64) -1231.23");
        assert_eq!(render(&1.21123f32), "(f32) 1.21123");
        assert_eq!(render(&2.0f64), "(f64) 2");
        assert_eq!(
            render(&Complex::new(2.0f64, 1.0)),
            "(Complex<f64>) (2+1i)"
        );
        assert_eq!(
            render(&Complex::new(12.5f32, -3.25)),
            "(Complex<f32>) (12.5-3.25i)"
        );
    }

    #[test]
    fn test_bool_and_string() {
        assert_eq!(render(&true), "(bool) true");
        assert_eq!(render(&false), "(bool) false");
        // Byte length and raw control characters
        assert_eq!(
            render(&"hello, 世界 \t\naaa"),
            "(string: 19) \"hello, 世界 \t\naaa\""
        );
        assert_eq!(render(&String::new()), "(string: 0) \"\"");
    }

    #[test]
    fn test_nested_record_copy_private() {
        let config = DumpConfig::default().with_visibility(VisibilityMode::CopyPrivate);
        let expected = "record(Person) {\n\
                        \t[name] =>\n\
                        \t(string: 3) \"aaa\"\n\
                        \t[age] =>\n\
                        \t(i32) 10\n\
                        \t[home] =>\n\
                        \trecord(Home) {\n\
                        \t\t[price:unexported] =>\n\
                        \t\t(i32) 1\n\
                        \t\t[address] =>\n\
                        \t\t(string: 5) \"aaaaa\"\n\
                        \t}\n\
                        }";
        assert_eq!(render_with(config, &create_person()), expected);
    }

    #[test]
    fn test_nested_record_skip_private() {
        let expected = "record(Person) {\n\
                        \t[name] =>\n\
                        \t(string: 3) \"aaa\"\n\
                        \t[age] =>\n\
                        \t(i32) 10\n\
                        \t[home] =>\n\
                        \trecord(Home) {\n\
                        \t\t[address] =>\n\
                        \t\t(string: 5) \"aaaaa\"\n\
                        \t}\n\
                        }";
        assert_eq!(render(&create_person()), expected);
    }

    #[test]
    fn test_record_through_shared_pointer() {
        let home = Rc::new(Home {
            price: 1,
            address: "x".to_string(),
        });
        let expected = "record(*Home) {\n\
                        \t[address] =>\n\
                        \t(string: 1) \"x\"\n\
                        }";
        assert_eq!(render(&home), expected);
        // Non-record referents render in place at the same depth
        assert_eq!(render(&Rc::new(5i32)), "(i32) 5");
    }

    #[test]
    fn test_nil_placeholder() {
        assert_eq!(render(&None::<Rc<i32>>), "(Option<Rc<i32>>) <nil>");
        assert_eq!(render(&Some(3u16)), "(u16) 3");
    }

    #[test]
    fn test_nested_sequences() {
        let nested = vec![vec![1u8]];
        let expected = "sequence(Vec<u8>: 1: 1) {\n\
                        \t[0] =>\n\
                        \tsequence(u8: 1: 1) {\n\
                        \t\t[0] =>\n\
                        \t\t(u8) 1\n\
                        \t}\n\
                        }";
        assert_eq!(render(&nested), expected);
    }

    #[test]
    fn test_sequence_capacity() {
        let mut reserved: Vec<u8> = Vec::with_capacity(10);
        reserved.push(1);
        let header = format!("sequence(u8: 1: {}) {{", reserved.capacity());
        assert!(render(&reserved).starts_with(&header));

        let mut deque = VecDeque::with_capacity(8);
        deque.push_back(1i32);
        let header = format!("sequence(i32: 1: {}) {{", deque.capacity());
        assert!(render(&deque).starts_with(&header));

        // Arrays and slices have no capacity of their own
        assert!(render(&[1i64, 2]).starts_with("sequence(i64: 2: 2) {"));
        assert!(render(&[0u8; 0]).starts_with("sequence(u8: 0: 0) {"));
    }

    #[test]
    fn test_heterogeneous_sequence() {
        let items: Vec<Box<dyn Inspect>> = vec![Box::new(1i32), Box::new(2.5f64), Box::new("hi")];
        let expected = "sequence(Box<dyn Inspect>: 3: 3) {\n\
                        \t[0] =>\n\
                        \t(i32) 1\n\
                        \t[1] =>\n\
                        \t(f64) 2.5\n\
                        \t[2] =>\n\
                        \t(string: 2) \"hi\"\n\
                        }";
        assert_eq!(render(&items), expected);
    }

    #[test]
    fn test_map_rendering() {
        let map = BTreeMap::from([("a", 1i32), ("b", 2)]);
        let expected = "map[&str]i32{\n\
                        \t[a] =>\n\
                        \t(i32) 1\n\
                        \t[b] =>\n\
                        \t(i32) 2\n\
                        }";
        assert_eq!(render(&map), expected);
    }

    #[test]
    fn test_map_record_key_uses_plain_text() {
        let map = BTreeMap::from([((1u8, "k"), true)]);
        let expected = "map[(u8, &str)]bool{\n\
                        \t[{1 k}] =>\n\
                        \t(bool) true\n\
                        }";
        assert_eq!(render(&map), expected);
    }

    #[test]
    fn test_channel_rendering() {
        let (tx, rx) = crossbeam_channel::bounded::<i32>(3);
        tx.send(1).unwrap();
        assert_eq!(render(&tx), "(Sender<i32>: 1: 3) Sender { .. }");
        assert_eq!(render(&rx), "(Receiver<i32>: 1: 3) Receiver { .. }");

        let (tx, _rx) = crossbeam_channel::unbounded::<bool>();
        assert_eq!(render(&tx), "(Sender<bool>: 0: unbounded) Sender { .. }");
    }

    #[test]
    fn test_unsupported_omitted_inside_record() {
        let callback = Callback {
            name: "x".to_string(),
            func: |x| x,
        };
        let expected = "record(Callback) {\n\
                        \t[name] =>\n\
                        \t(string: 1) \"x\"\n\
                        \t[func] =>\n\
                        \n\
                        }";
        assert_eq!(render(&callback), expected);
    }

    #[test]
    fn test_unsupported_fails_under_strict_policy() {
        let pointer: *const i32 = std::ptr::null();
        let dumper =
            Dumper::new(DumpConfig::default().with_unsupported(UnsupportedPolicy::Fail));
        match dumper.render(&pointer) {
            Err(DumpError::Unsupported { type_name }) => assert_eq!(type_name, "*const i32"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_custom_indent_unit() {
        let config = DumpConfig::default().with_indent("  ");
        let expected = "sequence(i32: 1: 1) {\n  [0] =>\n  (i32) 7\n}";
        assert_eq!(render_with(config, &vec![7i32]), expected);
    }

    #[test]
    fn test_tuple_and_unit_records() {
        let expected = "record((i32, bool)) {\n\
                        \t[0] =>\n\
                        \t(i32) 1\n\
                        \t[1] =>\n\
                        \t(bool) false\n\
                        }";
        assert_eq!(render(&(1i32, false)), expected);
        assert_eq!(render(&()), "record(()) {\n}");
    }

    #[test]
    fn test_map_record_key_hides_private_fields() {
        let map = BTreeMap::from([(
            Badge {
                label: "a".to_string(),
                pin: 1234,
            },
            1i32,
        )]);

        let expected = "map[Badge]i32{\n\
                        \t[{a}] =>\n\
                        \t(i32) 1\n\
                        }";
        assert_eq!(render(&map), expected);

        let expected = "map[Badge]i32{\n\
                        \t[{a 1234}] =>\n\
                        \t(i32) 1\n\
                        }";
        let config = DumpConfig::default().with_visibility(VisibilityMode::CopyPrivate);
        assert_eq!(render_with(config, &map), expected);
    }

    #[test]
    fn test_self_referencing_map_key_is_truncated() {
        let link = create_looped_link();
        let map = BTreeMap::from([(link.clone(), 7i32)]);

        let expected = "map[Rc<Link>]i32{\n\
                        \t[{1 <cycle>}] =>\n\
                        \t(i32) 7\n\
                        }";
        let output = Dumper::new(DumpConfig::default().with_max_depth(Some(8))).render(&map);

        let unguarded = Dumper::new(
            DumpConfig::default()
                .with_cycle_guard(false)
                .with_max_depth(Some(8)),
        )
        .render(&map);

        *link.next.borrow_mut() = None;
        assert_eq!(output.unwrap(), expected);
        assert!(matches!(unguarded, Err(DumpError::DepthLimit { limit: 8 })));
    }

    #[test]
    fn test_held_mutex_is_unsupported() {
        let mutex = Mutex::new(5i32);
        let guard = mutex.lock().unwrap();

        assert_eq!(render(&mutex), "");
        let strict = DumpConfig::default().with_unsupported(UnsupportedPolicy::Fail);
        match Dumper::new(strict).render(&mutex) {
            Err(DumpError::Unsupported { type_name }) => assert_eq!(type_name, "Mutex<i32>"),
            other => panic!("unexpected result: {:?}", other),
        }

        drop(guard);
        assert_eq!(render(&mutex), "(i32) 5");
    }

    #[test]
    fn test_poisoned_mutex_still_renders() {
        let mutex = Mutex::new(5i32);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = mutex.lock().unwrap();
            panic!("poisoning the lock");
        }));
        assert!(result.is_err());
        assert!(mutex.is_poisoned());
        assert_eq!(render(&mutex), "(i32) 5");
    }

    #[test]
    fn test_rwlock_under_write_guard() {
        let lock = RwLock::new(vec![1u8]);
        {
            let _reader = lock.read().unwrap();
            assert_eq!(render(&lock), "sequence(u8: 1: 1) {\n\t[0] =>\n\t(u8) 1\n}");
        }

        let writer = lock.write().unwrap();
        assert_eq!(render(&lock), "");
        drop(writer);
        assert!(render(&lock).starts_with("sequence(u8: 1: 1) {"));
    }

    #[test]
    fn test_unsized_shared_pointers() {
        let text: Rc<str> = Rc::from("ab");
        let bytes: Arc<[u8]> = Arc::from(vec![9u8]);
        let object: Arc<dyn Inspect> = Arc::new(true);

        assert_eq!(render(&text), "(string: 2) \"ab\"");
        assert_eq!(render(&bytes), "sequence(u8: 1: 1) {\n\t[0] =>\n\t(u8) 9\n}");
        assert_eq!(render(&object), "(bool) true");
    }
}
