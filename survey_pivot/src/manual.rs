/*!

This is the long-form manual for `survey_pivot` and `survdash`.

## Input formats

The following formats are supported:
* `pre_program` The pre-program survey export (CSV)
* `mid_program` The mid-program survey export (CSV)

Both are wide CSV exports: a first row of raw question text, then one row
per respondent. The two phases carry different raw headers, so each has its
own ordered rewrite table that maps the raw text to canonical
underscore-delimited names grouped by survey section.

### `pre_program`

The export produced before the start of the program. Expected sections
after normalization: `Business`, `Technology`, `Communication`,
`Soft_Skills`, `Program_Evaluation`, plus free-text questions such as
`If_any_what_further_assistance_would_you_have_preferred`.

### `mid_program`

The export produced halfway through the program. Expected sections after
normalization: `Business`, `Technology`, `Marketing_Communications`,
`Soft_Skills`, `Program_Aspect_Rating`, `Program_Experience_*`,
`Teaching_Fellow_Evaluation` and `Leading_Fellow_Evaluation`.

In both formats the respondent identifier column normalizes to
`Students_Id`, whatever its raw spelling was. A header that matches none of
the known question phrasings is still accepted: it only goes through the
generic punctuation and whitespace rules, and the tabulator treats the
result as a question of its own. A warning is logged when such a name does
not start with any known section prefix, since it usually means the source
question wording drifted.

## Rating scales

Two fixed vocabularies are built in:

* the satisfaction scale `Very Poor, Poor, Average, Good, Very Good`, used
  by every rating-style section;
* the knowledge scale `I did not improve my knowledge, I somewhat improved
  my knowledge, I already knew this, I improved my knowledge, I hugely
  improved my knowledge`, used by the `Program_Experience_*` questions of
  the mid-program export.

The orderings are contractual: chart axis order, color mapping and the
cumulative series all depend on them. The tabulator always emits every
category of the active vocabulary, zero-filled when nobody picked it.

## Configuration

`survdash --config` accepts a JSON file of the following shape:

```json
{
  "outputSettings": {
    "dashboardName": "Program feedback",
    "surveyDate": "2023-06-01",
    "programName": "EIT"
  },
  "responseFileSources": [
    {
      "provider": "pre_program",
      "filePath": "data/pre_program_responses.csv",
      "openEndedColumns": [
        "If_any_what_further_assistance_would_you_have_preferred"
      ]
    },
    {
      "provider": "mid_program",
      "filePath": "data/mid_program_responses.csv"
    }
  ]
}
```

File paths are resolved relative to the directory of the configuration
file. `openEndedColumns` names free-text columns (by canonical name) whose
responses are scored for sentiment and partitioned into positive, neutral
and negative buckets in the summary.

When both a `pre_program` and a `mid_program` source are present, the
summary also contains a side-by-side comparison of the section subsets the
two phases share.

## Output

The summary is a JSON document with one entry per dashboard: per-section
pivot tables (question, per-category tallies, cumulative frequency and
cumulative percentage series) and the open-ended sentiment partition. It is
printed to the standard output, or written to the path given with `--out`.
A reference summary can be provided with `--reference`; any difference
between the tabulated output and the reference is printed and reported as
an error.

*/
