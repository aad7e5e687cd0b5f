#![allow(missing_docs)] // test only
use ntk_ids::{id_vec::IdVec, Id};
use rand::{rngs::SmallRng, Rng, SeedableRng};

ntk_ids::define_id! {
    pub struct TestId;
}

const N: usize = 1024;

fn scale(i: usize, n: usize, max: usize) -> usize {
    (((i as u128) * (max as u128)) / (n as u128)) as usize
}

fn basic_tests<T: Id>() {
    for i in 0..=N {
        let index = scale(i, N, T::MAX_ID_INDEX);
        let id = T::try_from_id_index(index);
        assert_eq!(id.is_some(), index <= T::MAX_ID_INDEX);
        if let Some(value) = id {
            assert_eq!(value.id_index(), index);
        }
    }

    for index in T::MAX_ID_INDEX.saturating_sub(N)..=T::MAX_ID_INDEX.saturating_add(N) {
        let id = T::try_from_id_index(index);
        assert_eq!(id.is_some(), index <= T::MAX_ID_INDEX);
    }

    for i in 0..N {
        for j in 0..N / 64 {
            let a = scale(i, N, T::MAX_ID_INDEX);
            let b = scale(j * 64, N, T::MAX_ID_INDEX);
            assert_eq!(
                T::from_id_index(a).cmp(&T::from_id_index(b)),
                a.cmp(&b),
                "ordering of {a} and {b}"
            );
        }
    }
}

#[test]
fn test_usize() {
    basic_tests::<usize>();
}

#[test]
fn test_u32() {
    basic_tests::<u32>();
}

#[test]
fn test_defined_id() {
    basic_tests::<TestId>();
    assert_eq!(TestId::MAX_ID_INDEX, (u32::MAX - 1) as usize);
    assert_eq!(format!("{:?}", TestId::from_id_index(7)), "TestId(7)");
}

#[test]
#[should_panic]
fn test_out_of_range() {
    TestId::from_id_index(u32::MAX as usize);
}

#[test]
fn test_id_vec() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut vec: IdVec<TestId, u64> = IdVec::new();
    let mut reference = vec![];

    for _ in 0..N {
        let value: u64 = rng.gen();
        let key = vec.push(value);
        assert_eq!(key.id_index(), reference.len());
        reference.push(value);
    }

    for (key, &value) in vec.iter() {
        assert_eq!(reference[key.id_index()], value);
        assert_eq!(vec[key], value);
    }

    vec.grow_for_key(TestId::from_id_index(2 * N), 0);
    assert_eq!(vec.len(), 2 * N + 1);
    assert_eq!(vec.get(TestId::from_id_index(2 * N + 1)), None);
    assert_eq!(vec[TestId::from_id_index(2 * N)], 0);
}
