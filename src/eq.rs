use super::HumanName;

/// Two names are equal when every bucket reads the same, except that a
/// nickname only has to match when both names have one. Buckets compare as
/// text, so "van der Waals" equals itself however its pieces were merged.
///
/// This is not transitive: "John (Jack) Doe" == "John Doe" and "John Doe" ==
/// "John (Johnny) Doe", but the two nicknamed forms are not equal to each
/// other. Prefer comparing [`HumanName::as_dictionary`] output when that
/// matters.
impl PartialEq for HumanName {
    fn eq(&self, other: &HumanName) -> bool {
        let (ours, theirs) = (self.nickname(), other.nickname());
        let nicknames_agree = ours.is_empty() || theirs.is_empty() || ours == theirs;

        nicknames_agree
            && self.title() == other.title()
            && self.first() == other.first()
            && self.middle() == other.middle()
            && self.last() == other.last()
            && self.suffix() == other.suffix()
    }
}
