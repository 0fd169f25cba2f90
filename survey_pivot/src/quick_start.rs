/*!

# Quick start with Google Forms

This example shows you how to run an example end to end, using an online
tool to collect the survey responses. This example uses Google Forms
because it is free to use and has a large limit. Other providers
(Microsoft, Qualtrics) provide similar systems for free.

**Creating the survey** Create a new Form and use the **Multiple Choice
Grid** type of widget for each rated section. The rows are the skills being
rated, the columns are the five points of the satisfaction scale
(`Very Poor`, `Poor`, `Average`, `Good`, `Very Good`). The name of the
question matters: the header rewrite rules match on the exact question
text, so keep the phrasings listed in the [manual](../manual/index.html).
Add a short-answer question for the respondent identifier and, if you want
the sentiment view, a paragraph question for free-text feedback.

**Getting the results** After the survey closes, open the `Responses` tab
and export the responses, then download them in the **CSV format**. You
should obtain a file with one column per grid row and one line per
respondent, for instance:

```text
Students Id,How would you rate your proficiency in the following soft skills? [Communication],...
1,Good,...
2,Very Good,...
```

Run `survdash` on the export (the name of the file may differ for you):

```bash
survdash -i pre_program_responses.csv --input-type pre_program
```

After running this command, you should see the tabulated summary of the
survey in JSON form: one pivot table per section, with every category of
the scale present and the cumulative series precomputed:

```text
[2023-06-12T09:55:59Z INFO  survey_pivot] tabulate: processing 115 records over 5 categories
{
  "dashboards": [ ... ]
}
```

**Complete dashboards** For the full set of views (both program phases,
open-ended sentiment, the pre-vs-mid comparison), describe the exports in a
small JSON configuration file and pass it with `--config`. See the
[configuration section](../manual/index.html#configuration).

The `--out` flag writes the summary to a file instead of the standard
output, and `--reference` checks the output against a stored summary,
printing any difference. This is useful to pin the numbers of a published
dashboard while the normalization rules evolve.

*/
