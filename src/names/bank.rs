//! Seeded generator of substitute first names

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Output domain of the name bank
pub const FIRST_NAMES: &[&str] = &[
    "Aaron", "Abigail", "Adam", "Adrian", "Aiden", "Alex", "Alice", "Allison",
    "Amanda", "Amber", "Amy", "Andrea", "Andrew", "Angela", "Anna", "Anthony",
    "Ashley", "Austin", "Barbara", "Benjamin", "Beth", "Brandon", "Brenda",
    "Brian", "Brittany", "Bruce", "Bryan", "Caleb", "Cameron", "Carl", "Carlos",
    "Carol", "Caroline", "Catherine", "Charles", "Charlotte", "Chelsea", "Chris",
    "Christina", "Christine", "Christopher", "Cindy", "Claire", "Clara", "Cody",
    "Colin", "Connor", "Craig", "Crystal", "Cynthia", "Dale", "Daniel", "Danielle",
    "Darren", "David", "Dawn", "Deborah", "Denise", "Dennis", "Derek", "Diana",
    "Diane", "Donald", "Donna", "Dorothy", "Douglas", "Dylan", "Edward", "Eileen",
    "Eleanor", "Elizabeth", "Ellen", "Emily", "Emma", "Eric", "Erica", "Erin",
    "Ethan", "Eugene", "Eva", "Evan", "Evelyn", "Frances", "Francis", "Frank",
    "Gabriel", "Gary", "George", "Gerald", "Gloria", "Grace", "Gregory", "Hannah",
    "Harold", "Harry", "Heather", "Helen", "Henry", "Holly", "Howard", "Ian",
    "Isaac", "Isabella", "Jack", "Jacob", "Jacqueline", "Jake", "James", "Jamie",
    "Jane", "Janet", "Janice", "Jason", "Jean", "Jeffrey", "Jennifer", "Jeremy",
    "Jerry", "Jesse", "Jessica", "Jill", "Joan", "Joe", "Joel", "John", "Jonathan",
    "Jordan", "Jose", "Joseph", "Joshua", "Joyce", "Juan", "Judith", "Julia",
    "Julie", "Justin", "Karen", "Katherine", "Kathleen", "Kathryn", "Katie",
    "Keith", "Kelly", "Kenneth", "Kevin", "Kim", "Kimberly", "Kyle", "Larry",
    "Laura", "Lauren", "Lawrence", "Leah", "Leonard", "Leslie", "Lillian", "Linda",
    "Lindsay", "Lisa", "Logan", "Lori", "Louis", "Lucas", "Lucy", "Luke", "Lynn",
    "Madison", "Margaret", "Maria", "Marie", "Marilyn", "Mark", "Martha", "Martin",
    "Mary", "Mason", "Matthew", "Megan", "Melanie", "Melissa", "Michael", "Michelle",
    "Mike", "Mildred", "Monica", "Nancy", "Natalie", "Nathan", "Nicholas", "Nicole",
    "Noah", "Norma", "Oliver", "Olivia", "Oscar", "Pamela", "Patricia", "Patrick",
    "Paul", "Paula", "Peggy", "Peter", "Philip", "Rachel", "Ralph", "Randy",
    "Raymond", "Rebecca", "Regina", "Richard", "Robert", "Robin", "Roger", "Ronald",
    "Rose", "Roy", "Russell", "Ruth", "Ryan", "Samantha", "Samuel", "Sandra",
    "Sara", "Sarah", "Scott", "Sean", "Sharon", "Shawn", "Sheila", "Shirley",
    "Sophia", "Stephanie", "Stephen", "Steve", "Steven", "Susan", "Tammy", "Teresa",
    "Terry", "Theresa", "Thomas", "Tiffany", "Timothy", "Tina", "Todd", "Tom",
    "Tony", "Tracy", "Travis", "Tyler", "Valerie", "Vanessa", "Victor", "Victoria",
    "Vincent", "Virginia", "Walter", "Wanda", "Wayne", "Wendy", "William", "Willie",
    "Zachary",
];

/// Anything that can hand out candidate substitute names.
pub trait NameSource {
    fn next_candidate(&mut self) -> String;
}

/// Deterministic pseudo-random draw from [`FIRST_NAMES`].
///
/// The same seed string always yields the same sequence of candidates.
pub struct NameBank {
    seed: String,
    rng: Pcg64Mcg,
}

impl NameBank {
    pub fn new(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            rng: Pcg64Mcg::seed_from_u64(seed_hash(seed)),
        }
    }

    /// Skip the first `draws` candidates, for resuming a session that
    /// already holds that many mappings
    pub fn advanced(mut self, draws: usize) -> Self {
        for _ in 0..draws {
            self.next_candidate();
        }
        self
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl NameSource for NameBank {
    fn next_candidate(&mut self) -> String {
        let idx = self.rng.gen_range(0..FIRST_NAMES.len());
        FIRST_NAMES[idx].to_string()
    }
}

/// Pick a seed for runs where the operator did not supply one
pub fn random_seed() -> String {
    rand::thread_rng().gen::<u32>().to_string()
}

/// FNV-1a over the seed bytes
fn seed_hash(s: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in s.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = NameBank::new("demo");
        let mut b = NameBank::new("demo");
        let first: Vec<String> = (0..50).map(|_| a.next_candidate()).collect();
        let second: Vec<String> = (0..50).map(|_| b.next_candidate()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = NameBank::new("alpha");
        let mut b = NameBank::new("beta");
        let first: Vec<String> = (0..20).map(|_| a.next_candidate()).collect();
        let second: Vec<String> = (0..20).map(|_| b.next_candidate()).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn test_candidates_come_from_domain() {
        let mut bank = NameBank::new("42");
        for _ in 0..200 {
            let name = bank.next_candidate();
            assert!(FIRST_NAMES.contains(&name.as_str()), "unexpected name {}", name);
        }
    }

    #[test]
    fn test_random_seed_is_numeric() {
        let seed = random_seed();
        assert!(seed.parse::<u32>().is_ok());
        assert_eq!(NameBank::new(&seed).seed(), seed);
    }

    #[test]
    fn test_advanced_continues_sequence() {
        let mut full = NameBank::new("resume");
        let tail: Vec<String> = (0..40).map(|_| full.next_candidate()).skip(30).collect();

        let mut resumed = NameBank::new("resume").advanced(30);
        let next: Vec<String> = (0..10).map(|_| resumed.next_candidate()).collect();
        assert_eq!(next, tail);
        assert_eq!(resumed.seed(), "resume");
    }

    #[test]
    fn test_seed_hash_is_stable() {
        assert_eq!(seed_hash(""), 0xcbf29ce484222325);
        assert_ne!(seed_hash("a"), seed_hash("b"));
    }
}
