use crate::{
    attrs::{Attributed, FieldItems, Fields, ItemsAsAttributes},
    defaulting::{DefaultingMap, OnMissing},
    filter::{Everything, KeyPattern, SubsetView},
    mapping::Mapping,
    ops::{invert, map_values, sorted_items},
    order::{ByKey, GreaterOrEqual, Less, Natural, Reversed},
    ordered::OrderedKeyMap,
    range::{Position, RangeMap, RangeValue},
    stack::DictStack,
    transform::{FoldCase, FoldedCaseMap, KeyTransformingMap, StringKeyMap},
    Error,
};
use paste::paste;
use rand::Rng;
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt::Debug,
    rc::Rc,
};

const STRSIZE: usize = 3;

trait Rand: Sized {
    fn rand<R: Rng>(r: &mut R) -> Self;
}

impl Rand for String {
    fn rand<R: Rng>(r: &mut R) -> Self {
        let mut s = String::new();
        for _ in 0..STRSIZE {
            s.push(r.gen_range('a'..='e'))
        }
        s
    }
}

impl Rand for i32 {
    fn rand<R: Rng>(r: &mut R) -> Self {
        r.gen_range(-500..500)
    }
}

impl Rand for i64 {
    fn rand<R: Rng>(r: &mut R) -> Self {
        r.gen_range(-5000..5000)
    }
}

impl Rand for u8 {
    fn rand<R: Rng>(r: &mut R) -> Self {
        r.gen()
    }
}

fn random<T: Rand>() -> T {
    let mut rng = rand::thread_rng();
    T::rand(&mut rng)
}

fn randvec<T: Rand>(len: usize) -> Vec<T> {
    let mut v: Vec<T> = Vec::new();
    for _ in 0..len {
        v.push(random())
    }
    v
}

fn spans() -> RangeMap<i32, char> {
    vec![(3, 'a'), (6, 'b')].into_iter().collect()
}

fn closed_spans() -> RangeMap<i32, char> {
    let mut r = spans();
    r.insert_undefined(0);
    r
}

// the first boundary at or above q, found through BTreeMap::range
fn check_range_oracle<T: Rand + Ord + Clone + Debug>() {
    let mut rng = rand::thread_rng();
    let mut r: RangeMap<T, usize> = RangeMap::new();
    let mut oracle: BTreeMap<T, RangeValue<usize>> = BTreeMap::new();
    for (i, k) in randvec::<T>(64).into_iter().enumerate() {
        if rng.gen_bool(0.2) {
            r.insert_undefined(k.clone());
            oracle.insert(k, RangeValue::Undefined);
        } else {
            r.insert(k.clone(), i);
            oracle.insert(k, RangeValue::Value(i));
        }
    }
    assert_eq!(r.len(), oracle.len());
    for q in randvec::<T>(500) {
        let expected = match oracle.range(q.clone()..).next() {
            Some((_, RangeValue::Value(v))) => Ok(v),
            Some((_, RangeValue::Undefined)) | None => Err(Error::NotFound),
        };
        assert_eq!(r.get(&q), expected, "lookup {:?}", q);
    }
}

fn check_bounds_resolve<T: Rand + Ord + Clone + Debug>() {
    for _ in 0..20 {
        let r: RangeMap<T, usize> = randvec::<T>(16)
            .into_iter()
            .enumerate()
            .map(|(i, k)| (k, i))
            .collect();
        let (lo, hi) = r.bounds().unwrap();
        assert!(lo <= hi);
        assert!(r.get(hi).is_ok());
        assert_eq!(r.get_at(Position::Last), r.get(hi));
        assert_eq!(r.matching_boundary(lo), Ok(lo));
    }
}

fn check_ordered_oracle<T: Rand + Ord + Clone + Debug>() {
    let mut rng = rand::thread_rng();
    let mut m: OrderedKeyMap<T, usize> = OrderedKeyMap::new();
    let mut oracle: BTreeMap<T, usize> = BTreeMap::new();
    for (i, k) in randvec::<T>(1000).into_iter().enumerate() {
        if rng.gen_bool(0.3) {
            assert_eq!(m.remove(&k), oracle.remove(&k));
        } else {
            assert_eq!(m.insert(k.clone(), i), oracle.insert(k, i));
        }
    }
    assert_eq!(m.len(), oracle.len());
    assert!(m.iter().eq(oracle.iter()));
    assert_eq!(m.first(), oracle.iter().next());
    assert_eq!(m.last(), oracle.iter().next_back());
    assert_eq!(m.nth(-1), oracle.iter().next_back());
    for (k, v) in &oracle {
        assert_eq!(m.get(k), Some(v));
    }
}

macro_rules! keyed_tests {
    ($($t:ident),*) => {
        paste! {
            $(
                #[test]
                fn [<range_matches_btree_oracle_ $t:lower>]() {
                    check_range_oracle::<$t>()
                }

                #[test]
                fn [<range_upper_bound_resolves_ $t:lower>]() {
                    check_bounds_resolve::<$t>()
                }

                #[test]
                fn [<ordered_insert_remove_ $t:lower>]() {
                    check_ordered_oracle::<$t>()
                }
            )*
        }
    };
}

keyed_tests!(i32, i64, u8, String);

#[test]
fn range_spans_closed_above() {
    let r = spans();
    for k in 1..=3 {
        assert_eq!(r.get(&k), Ok(&'a'));
    }
    for k in 4..=6 {
        assert_eq!(r.get(&k), Ok(&'b'));
    }
    assert_eq!(r.get(&7), Err(Error::NotFound));
}

#[test]
fn range_open_below() {
    let r = spans();
    assert_eq!(r.get(&0), Ok(&'a'));
    assert_eq!(r.get(&-1), Ok(&'a'));
    assert_eq!(r.get(&i32::MIN), Ok(&'a'));
}

#[test]
fn range_float_lookup() {
    let mut r = RangeMap::with_order(|a: &f64, b: &f64| a.total_cmp(b));
    r.insert(3.0, 'a');
    r.insert(6.0, 'b');
    assert_eq!(r.get(&4.5), Ok(&'b'));
    assert_eq!(r.get(&3.0), Ok(&'a'));
    assert_eq!(r.get(&-0.5), Ok(&'a'));
    assert_eq!(r.bounds(), Ok((&3.0, &6.0)));
}

#[test]
fn range_sentinel_closes_span() {
    let r = closed_spans();
    assert_eq!(r.get(&0), Err(Error::NotFound));
    assert_eq!(r.get(&-1), Err(Error::NotFound));
    assert_eq!(r.get(&1), Ok(&'a'));
    assert_eq!(r.matching_boundary(&-1), Ok(&0));
    assert!(!r.contains_key(&0));
    assert!(r.contains_key(&5));
}

#[test]
fn range_bounds() {
    assert_eq!(spans().bounds(), Ok((&3, &6)));
    assert_eq!(closed_spans().bounds(), Ok((&0, &6)));
    let empty: RangeMap<i32, char> = RangeMap::new();
    assert_eq!(empty.bounds(), Err(Error::EmptyCollection("range map")));
}

#[test]
fn range_positional() {
    let r = spans();
    assert_eq!(r.get_at(Position::First), Ok(&'a'));
    assert_eq!(r.get_at(Position::Last), Ok(&'b'));
    assert_eq!(r.get_at(Position::Index(1)), Ok(&'b'));
    assert_eq!(r.get_at(Position::Index(-2)), Ok(&'a'));
    assert_eq!(
        r.get_at(Position::Index(2)),
        Err(Error::OutOfRange { index: 2, len: 2 })
    );
    assert_eq!(
        r.get_at(Position::Index(-3)),
        Err(Error::OutOfRange { index: -3, len: 2 })
    );
    assert_eq!(closed_spans().get_at(Position::First), Err(Error::NotFound));
    let empty: RangeMap<i32, char> = RangeMap::new();
    assert_eq!(
        empty.get_at(Position::First),
        Err(Error::EmptyCollection("range map"))
    );
}

#[test]
fn range_strict_matcher() {
    let mut r = RangeMap::with_policy(Natural, Less);
    r.insert(3, 'a');
    r.insert(6, 'b');
    assert_eq!(r.get(&2), Ok(&'a'));
    assert_eq!(r.get(&3), Ok(&'b'));
    assert_eq!(r.get(&6), Err(Error::NotFound));
}

#[test]
fn range_descending_orientation() {
    // spans open above, closed below
    let mut r = RangeMap::with_policy(Reversed(Natural), GreaterOrEqual);
    r.insert(3, 'a');
    r.insert(6, 'b');
    assert_eq!(r.get(&100), Ok(&'b'));
    assert_eq!(r.get(&6), Ok(&'b'));
    assert_eq!(r.get(&5), Ok(&'a'));
    assert_eq!(r.get(&2), Err(Error::NotFound));
    assert_eq!(r.bounds(), Ok((&6, &3)));
    assert_eq!(r.get_at(Position::First), Ok(&'b'));
}

#[test]
fn range_custom_matcher() {
    let mut r = RangeMap::with_policy(Natural, |q: &i32, b: &i32| q % 10 == *b);
    r.insert(1, "one");
    r.insert(2, "two");
    assert_eq!(r.get(&21), Ok(&"one"));
    assert_eq!(r.get(&12), Ok(&"two"));
    assert_eq!(r.get(&13), Err(Error::NotFound));
}

#[test]
fn range_order_by_derived_key() {
    let mut r = RangeMap::with_order(ByKey(|k: &i32| -k));
    r.insert(3, 'a');
    r.insert(6, 'b');
    // 6 sorts first, and every lookup <= 6 stops there
    assert_eq!(r.bounds(), Ok((&6, &3)));
    assert_eq!(r.get(&1), Ok(&'b'));
    assert_eq!(r.get(&5), Ok(&'b'));
    assert_eq!(r.get(&7), Err(Error::NotFound));
}

#[test]
fn range_sees_raw_mutation() {
    let mut r = spans();
    r.entries_mut().insert(9, RangeValue::Value('c'));
    assert_eq!(r.get(&7), Ok(&'c'));
    assert_eq!(r.remove(&6), Some(RangeValue::Value('b')));
    assert_eq!(r.get(&5), Ok(&'c'));
    r.entries_mut().retain(|k, _| *k != 3);
    assert_eq!(r.get(&1), Ok(&'c'));
    assert_eq!(r.bounds(), Ok((&9, &9)));
}

#[test]
fn range_overwrite_boundary() {
    let mut r = spans();
    assert_eq!(r.insert(3, 'z'), Some(RangeValue::Value('a')));
    assert_eq!(r.len(), 2);
    assert_eq!(r.get(&1), Ok(&'z'));
    assert_eq!(r.insert_undefined(3), Some(RangeValue::Value('z')));
    assert_eq!(r.get(&1), Err(Error::NotFound));
}

#[test]
fn ordered_custom_identity() {
    let mut m = OrderedKeyMap::with_order(|a: &String, b: &String| {
        a.to_lowercase().cmp(&b.to_lowercase())
    });
    assert_eq!(m.insert("Apple".to_string(), 1), None);
    assert_eq!(m.insert("apple".to_string(), 2), Some(1));
    m.insert("banana".to_string(), 3);
    assert_eq!(m.len(), 2);
    assert_eq!(m.first(), Some((&"Apple".to_string(), &2)));
    assert_eq!(m.get(&"APPLE".to_string()), Some(&2));
}

#[test]
fn ordered_positions_and_retain() {
    let mut m: OrderedKeyMap<i32, i32> = (0..10).map(|k| (k, k * k)).collect();
    assert_eq!(m.nth(0), Some((&0, &0)));
    assert_eq!(m.nth(-2), Some((&8, &64)));
    assert_eq!(m.nth(10), None);
    assert_eq!(m.nth(-11), None);
    m.retain(|k, _| k % 2 == 0);
    assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec![0, 2, 4, 6, 8]);
    for v in m.values_mut() {
        *v += 1;
    }
    assert_eq!(m[&4], 17);
    m.clear();
    assert!(m.is_empty());
    assert_eq!(m.first(), None);
}

fn two_layers() -> DictStack<HashMap<&'static str, i32>> {
    DictStack::from(vec![
        HashMap::from([("a", 1), ("c", 2)]),
        HashMap::from([("b", 2), ("a", 2)]),
    ])
}

#[test]
fn stack_shadowing() {
    let mut stack = two_layers();
    assert_eq!(stack.get(&"a"), Ok(&2));
    assert_eq!(stack.get(&"b"), Ok(&2));
    assert_eq!(stack.get(&"c"), Ok(&2));
    stack.push(HashMap::from([("a", 3)]));
    assert_eq!(stack.get(&"a"), Ok(&3));
    let top = stack.pop().unwrap();
    assert_eq!(top.get("a"), Some(&3));
    assert_eq!(stack.get(&"a"), Ok(&2));
    stack.pop().unwrap();
    assert_eq!(stack.get(&"a"), Ok(&1));
    assert_eq!(stack.get(&"b"), Err(Error::NotFound));
}

#[test]
fn stack_keys_union() {
    let stack = two_layers();
    let expected: HashSet<&&str> = [&"a", &"b", &"c"].iter().copied().collect();
    assert_eq!(stack.keys(), expected);
    assert_eq!(Mapping::len(&stack), 3);
    let resolved: HashMap<&str, i32> = stack.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(resolved, HashMap::from([("a", 2), ("b", 2), ("c", 2)]));
}

#[test]
fn stack_empty() {
    let mut stack: DictStack<HashMap<i32, i32>> = DictStack::new();
    assert_eq!(stack.pop(), Err(Error::EmptyCollection("dict stack")));
    assert_eq!(stack.get(&1), Err(Error::NotFound));
    assert_eq!(
        stack.insert_top(1, 1),
        Err(Error::EmptyCollection("dict stack"))
    );
    assert!(stack.keys().is_empty());
}

#[test]
fn stack_writes_go_to_top() {
    let mut stack = two_layers();
    assert_eq!(stack.insert_top("c", 9), Ok(None));
    assert_eq!(stack.get(&"c"), Ok(&9));
    let top = stack.pop().unwrap();
    assert_eq!(top.get("c"), Some(&9));
    assert_eq!(stack.get(&"c"), Ok(&2));
}

#[test]
fn stack_is_a_live_view() {
    let mut stack = two_layers();
    stack.layers_mut()[0].insert("d", 4);
    assert_eq!(stack.get(&"d"), Ok(&4));
    stack.layers_mut()[0].insert("a", 100);
    assert_eq!(stack.get(&"a"), Ok(&2));
    if let Some(top) = stack.top_mut() {
        top.remove("a");
    }
    assert_eq!(stack.get(&"a"), Ok(&100));
    assert_eq!(stack.depth(), 2);
}

#[test]
fn stack_of_borrowed_layers() {
    let base = BTreeMap::from([(1, "one"), (2, "two")]);
    let over = BTreeMap::from([(2, "deux")]);
    let mut stack = DictStack::new();
    stack.push(&base);
    stack.push(&over);
    assert_eq!(stack.get(&2), Ok(&"deux"));
    assert_eq!(stack.get(&1), Ok(&"one"));
    drop(stack);
    // the layers were never copied or changed
    assert_eq!(base.len(), 2);
    assert_eq!(over.get(&2), Some(&"deux"));
}

#[test]
fn stack_of_shared_layers() {
    let shared = Rc::new(HashMap::from([("x", 1)]));
    let mut s0 = DictStack::from(vec![Rc::clone(&shared)]);
    let s1 = DictStack::from(vec![Rc::clone(&shared)]);
    s0.push(Rc::new(HashMap::from([("x", 2)])));
    assert_eq!(s0.get(&"x"), Ok(&2));
    assert_eq!(s1.get(&"x"), Ok(&1));
    assert_eq!(Rc::strong_count(&shared), 3);
}

#[test]
fn stack_of_folded_case_layers() {
    let mut lower: FoldedCaseMap<i32> = FoldedCaseMap::default();
    lower.insert("Name", 1);
    let mut stack = DictStack::from(vec![lower, FoldedCaseMap::default()]);
    assert_eq!(stack.get(&"NAME".to_string()), Ok(&1));
    stack.insert_top("NaMe".to_string(), 2).unwrap();
    assert_eq!(stack.get(&"name".to_string()), Ok(&2));
}

#[test]
fn stack_matches_flattened_oracle() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let depth = rng.gen_range(0..6);
        let mut stack = DictStack::new();
        let mut oracle: HashMap<i32, i32> = HashMap::new();
        for _ in 0..depth {
            let layer: HashMap<i32, i32> = (0..rng.gen_range(0..20))
                .map(|_| (rng.gen_range(0..50), rng.gen()))
                .collect();
            oracle.extend(layer.iter().map(|(k, v)| (*k, *v)));
            stack.push(layer);
        }
        for k in 0..50 {
            assert_eq!(stack.get(&k).ok(), oracle.get(&k));
        }
        assert_eq!(Mapping::len(&stack), oracle.len());
        let resolved: HashMap<i32, i32> = stack.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(resolved, oracle);
    }
}

#[test]
fn folded_case_collisions() {
    let mut m = FoldedCaseMap::default();
    m.insert("heLlo", "world");
    assert_eq!(m.get("hello"), Some(&"world"));
    assert!(m.contains_key("HELLO"));
    assert_eq!(m.insert("HELLO", "world2"), Some("world"));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("hello"), Some(&"world2"));
    let keys: Vec<&String> = m.keys().collect();
    assert_eq!(keys, vec!["hello"]);
    assert_eq!(m.remove("Hello"), Some("world2"));
    assert!(m.is_empty());
}

#[test]
fn folded_case_bulk_source_order() {
    let m: FoldedCaseMap<i32> =
        KeyTransformingMap::from_entries(FoldCase, vec![("heLlo", 1), ("Hello", 2)]);
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("HELLO"), Some(&2));
    let m: FoldedCaseMap<i32> =
        KeyTransformingMap::from_entries(FoldCase, vec![("Hello", 2), ("heLlo", 1)]);
    assert_eq!(m.get("HELLO"), Some(&1));
}

#[test]
fn string_keys() {
    let mut d: StringKeyMap<&str> = StringKeyMap::default();
    d.insert("farther", "closer");
    d.insert("Lasting", "fleeting");
    d.insert(&3, "three");
    d.insert(&2.5, "two and a half");
    assert!(d.contains_key("3"));
    assert!(d.contains_key(&3));
    assert_eq!(d.get(&3), d.get("3"));
    assert_eq!(d.get("2.5"), Some(&"two and a half"));
    assert!(d.contains_key("Lasting"));
    assert!(!d.contains_key("lasting"));
    assert_eq!(d.len(), 4);
}

#[test]
fn closure_transform() {
    let mut m: KeyTransformingMap<i32, &str, _> =
        KeyTransformingMap::new(|k: &i32| k.rem_euclid(10));
    m.insert(&13, "three");
    m.insert(&-7, "also three");
    assert_eq!(m.len(), 1);
    assert_eq!(m.get(&23), Some(&"also three"));
    if let Some(v) = m.get_mut(&3) {
        *v = "changed";
    }
    assert_eq!(m.get(&3), Some(&"changed"));
    assert_eq!(m.values().copied().collect::<Vec<_>>(), vec!["changed"]);
}

fn sample() -> HashMap<String, i32> {
    vec![("a", 1), ("b", 2), ("c", 3)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn owned(pairs: &[(&str, i32)]) -> HashMap<String, i32> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn subset_by_keys() {
    let m = sample();
    let filtered = SubsetView::new(&m, vec!["a".to_string(), "c".to_string()]);
    assert!(filtered == owned(&[("a", 1), ("c", 3)]));
    assert_eq!(filtered.get(&"a".to_string()), Ok(&1));
    // b is in the map but not in the view
    assert_eq!(filtered.get(&"b".to_string()), Err(Error::NotFound));
    assert!(!filtered.contains_key(&"b".to_string()));
    let absent = SubsetView::new(&m, vec!["z".to_string()]);
    assert!(absent.is_empty());
    assert_eq!(absent.get(&"z".to_string()), Err(Error::NotFound));
}

#[test]
fn subset_by_pattern() {
    let mut m = sample();
    m.insert("d".to_string(), 4);
    m.insert("ef".to_string(), 5);
    {
        let filtered = SubsetView::new(&m, KeyPattern::new(".$").unwrap());
        assert!(filtered == owned(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]));
    }
    m.remove("d");
    m.remove("a");
    let filtered = SubsetView::new(&m, KeyPattern::new(".$").unwrap());
    assert_eq!(filtered.to_hash_map(), owned(&[("b", 2), ("c", 3)]));
}

#[test]
fn subset_pattern_is_anchored_at_start() {
    let m = owned(&[("apple", 1), ("pineapple", 2)]);
    let filtered = SubsetView::new(&m, KeyPattern::new("apple").unwrap());
    assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["apple"]);
}

#[test]
fn subset_keys_and_pattern_union() {
    let m = owned(&[("a", 1), ("bb", 2), ("cc", 3)]);
    let include = (vec!["cc".to_string()], KeyPattern::new(".$").unwrap());
    let filtered = SubsetView::new(&m, include);
    assert!(filtered == owned(&[("a", 1), ("cc", 3)]));
}

#[test]
fn subset_bad_pattern() {
    match KeyPattern::new("(") {
        Err(Error::InvalidArgument { name, .. }) => assert_eq!(name, "pattern"),
        r => panic!("expected invalid argument, got {:?}", r),
    }
}

#[test]
fn subset_everything() {
    let m = sample();
    let all = SubsetView::new(&m, Everything);
    assert!(all == m);
    assert_eq!(Mapping::len(&all), 3);
}

#[test]
fn invert_map() {
    let mut numbers = HashMap::from([("a", 1), ("b", 2), ("c", 3)]);
    let letters = invert(&numbers).unwrap();
    assert_eq!(letters[&1], "a");
    assert_eq!(letters.len(), 3);
    numbers.insert("d", 3);
    assert_eq!(invert(&numbers), Err(Error::KeyConflict));
}

#[test]
fn map_values_keeps_keys() {
    let d = HashMap::from([("a", 1), ("b", 2)]);
    assert_eq!(map_values(&d, |v| v + 1), HashMap::from([("a", 2), ("b", 3)]));
}

fn keys<'a>(items: Vec<(&&'a str, &i32)>) -> Vec<&'a str> {
    items.into_iter().map(|(k, _)| *k).collect()
}

#[test]
fn sorted_items_orders() {
    let sample = HashMap::from([("foo", 20), ("bar", 42), ("baz", 10)]);
    assert_eq!(keys(sorted_items(&sample, Natural)), vec!["bar", "baz", "foo"]);
    assert_eq!(
        keys(sorted_items(&sample, Reversed(Natural))),
        vec!["foo", "baz", "bar"]
    );
    let reversed_spelling = ByKey(|k: &&str| k.chars().rev().collect::<String>());
    assert_eq!(
        keys(sorted_items(&sample, reversed_spelling)),
        vec!["foo", "bar", "baz"]
    );
}

#[test]
fn defaulting_identity() {
    let mut d: DefaultingMap<HashMap<i32, i32>> = DefaultingMap::new(OnMissing::identity());
    assert_eq!(*d.get(&42).unwrap(), 42);
    d.insert(7, 700);
    assert_eq!(*d.get(&7).unwrap(), 700);
    assert!(d.contains_key(&7));
    assert!(!d.contains_key(&42));
    assert_eq!(d.len(), 1);
}

#[test]
fn defaulting_raise_and_default() {
    let d: DefaultingMap<HashMap<&str, i32>> = DefaultingMap::new(OnMissing::Raise);
    assert_eq!(d.get(&"x"), Err(Error::NotFound));
    let mut d = DefaultingMap::wrap(BTreeMap::from([("x", 1)]), OnMissing::Default(0));
    assert_eq!(*d.get(&"x").unwrap(), 1);
    assert_eq!(*d.get(&"y").unwrap(), 0);
    assert_eq!(d.remove(&"x"), Some(1));
    assert_eq!(*d.get(&"x").unwrap(), 0);
}

struct Point {
    x: i64,
    y: i64,
}

impl Fields for Point {
    type Value = i64;

    fn field(&self, name: &str) -> Option<&i64> {
        match name {
            "x" => Some(&self.x),
            "y" => Some(&self.y),
            _ => None,
        }
    }
}

#[test]
fn fields_as_items() {
    let p = Point { x: 3, y: -1 };
    let items = FieldItems(&p);
    assert_eq!(items.get("x"), Ok(&3));
    assert_eq!(items.get("y"), Ok(&-1));
    assert_eq!(items.get("z"), Err(Error::NotFound));
    assert!(items.contains_key("y"));
}

#[test]
fn fields_shadow_items() {
    let mut a = Attributed::new(HashMap::new());
    a.items_mut().insert("foo".to_string(), "bar");
    assert_eq!(a.attr("foo"), Ok(&"bar"));
    assert_eq!(a.set_field("foo", "henry"), None);
    assert_eq!(a.attr("foo"), Ok(&"henry"));
    assert_eq!(a.items().get("foo"), Some(&"bar"));
    assert_eq!(
        a.attr("missing"),
        Err(Error::NoAttribute("missing".to_string()))
    );
}

#[test]
fn range_derived_order_keeps_distinct_boundaries() {
    let mut r = RangeMap::with_order(ByKey(|k: &i32| k.abs()));
    r.insert(-3, 'n');
    r.insert(3, 'p');
    assert_eq!(r.len(), 2);
    assert_eq!(r.bounds(), Ok((&-3, &3)));
    assert_eq!(r.get(&-5), Ok(&'n'));
    assert_eq!(r.get(&0), Ok(&'p'));
    assert_eq!(r.insert(3, 'q'), Some(RangeValue::Value('p')));
    assert_eq!(r.len(), 2);
    assert_eq!(r.get_at(Position::First), Ok(&'n'));
}

#[test]
fn sorted_items_derived_key_ties() {
    let m = HashMap::from([(3, 'c'), (-3, 'b'), (1, 'a')]);
    let ks: Vec<i32> = sorted_items(&m, ByKey(|k: &i32| k.abs()))
        .into_iter()
        .map(|(k, _)| *k)
        .collect();
    assert_eq!(ks, vec![1, -3, 3]);
}

#[test]
fn ordered_retain_keeps_pairs_aligned() {
    let mut m: OrderedKeyMap<i32, i32> = (0..10_000).map(|k| (k, k * 2)).collect();
    m.retain(|k, v| {
        *v += 1;
        k % 3 == 0
    });
    assert_eq!(m.len(), 3334);
    for (k, v) in &m {
        assert_eq!(k % 3, 0);
        assert_eq!(*v, k * 2 + 1);
    }
    m.retain(|_, _| false);
    assert!(m.is_empty());
}

#[test]
fn subset_pattern_end_before_trailing_newline() {
    let m = owned(&[("a\n", 1), ("ab\n", 2), ("b", 3), ("c\n\n", 4)]);
    let filtered = SubsetView::new(&m, KeyPattern::new(".$").unwrap());
    assert!(filtered == owned(&[("a\n", 1), ("b", 3)]));
}

#[test]
fn defaulting_map_as_attributes() {
    let mut d: DefaultingMap<HashMap<String, &str>> =
        DefaultingMap::new(OnMissing::Default("missing item"));
    assert_eq!(d.attr("missing"), Ok(&"missing item"));
    assert_eq!(d.attr("foo"), Ok(&"missing item"));
    d.insert("foo".to_string(), "bar");
    assert_eq!(d.attr("foo"), Ok(&"bar"));
    let strict: DefaultingMap<HashMap<String, &str>> = DefaultingMap::new(OnMissing::Raise);
    assert_eq!(
        strict.attr("missing"),
        Err(Error::NoAttribute("missing".to_string()))
    );
}

#[cfg(feature = "serde")]
mod serde_tests {
    use crate::{
        range::{RangeMap, RangeValue},
        transform::FoldedCaseMap,
        OrderedKeyMap,
    };

    #[test]
    fn range_map_json() {
        let mut r: RangeMap<i32, String> = RangeMap::new();
        r.insert(3, "a".to_string());
        r.insert(6, "b".to_string());
        r.insert_undefined(0);
        let s = serde_json::to_string(&r).unwrap();
        assert_eq!(s, r#"[[0,null],[3,"a"],[6,"b"]]"#);
        let back: RangeMap<i32, String> = serde_json::from_str(&s).unwrap();
        assert_eq!(back, r);
        assert_eq!(back.entries().first(), Some((&0, &RangeValue::Undefined)));
    }

    #[test]
    fn ordered_map_json_sorts_on_load() {
        let m: OrderedKeyMap<i32, i32> = serde_json::from_str("[[3,30],[1,10],[2,20]]").unwrap();
        assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(serde_json::to_string(&m).unwrap(), "[[1,10],[2,20],[3,30]]");
    }

    #[test]
    fn folded_case_json_folds_on_load() {
        let m: FoldedCaseMap<i32> = serde_json::from_str(r#"{"HeLLo": 1}"#).unwrap();
        assert_eq!(m.get("hello"), Some(&1));
        assert_eq!(serde_json::to_string(&m).unwrap(), r#"{"hello":1}"#);
    }
}

#[cfg(feature = "rayon")]
mod rayon_tests {
    use crate::OrderedKeyMap;
    use rayon::prelude::*;

    #[test]
    fn par_iter_in_order() {
        let m: OrderedKeyMap<i32, i32> = (0..1000).rev().map(|k| (k, 2 * k)).collect();
        let sum: i32 = m.par_iter().map(|(k, v)| k + v).sum();
        assert_eq!(sum, 3 * (0..1000).sum::<i32>());
        let keys: Vec<i32> = m.par_iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, (0..1000).collect::<Vec<_>>());
    }
}
